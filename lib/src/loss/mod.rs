use ndarray::Array1;

/// A differentiable loss function used during training.
///
/// Implementors define:
/// - the scalar loss value (for logging/metrics)
/// - the gradient of the loss w.r.t. the model's predictions
///
/// The gradient is passed to the model's `backward()` to obtain parameter gradients.
pub trait Loss {
    type Prediction;
    type Target;

    fn loss(&self, prediction: &Self::Prediction, target: &Self::Target) -> f64;

    /// Gradient of the loss w.r.t. the prediction: ∂L/∂pred.
    fn grad_wrt_prediction(
        &self,
        prediction: &Self::Prediction,
        target: &Self::Target,
    ) -> Self::Prediction;
}

/// Mean Squared Error (MSE) loss: `L = (1/n) * Σ(pred_i - target_i)^2`
///
/// Gradient w.r.t. prediction: `∂L/∂pred = (pred - target) / n`
///
/// The factor of 2 is omitted and absorbed into the learning rate, so the
/// gradient is the per-sample residual divided by the sample count. Fed
/// through a linear model's backward pass this yields the mean residual for
/// the intercept and the mean `residual × x` for the slope.
#[derive(Debug, Clone, Copy, Default)]
pub struct MSELoss;

impl Loss for MSELoss {
    type Prediction = Array1<f64>;
    type Target = Array1<f64>;

    fn loss(&self, pred: &Array1<f64>, target: &Array1<f64>) -> f64 {
        let diff = pred - target;
        diff.dot(&diff) / diff.len() as f64
    }

    fn grad_wrt_prediction(&self, pred: &Array1<f64>, target: &Array1<f64>) -> Array1<f64> {
        let n = pred.len() as f64;
        (pred - target) / n
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_mse_loss() {
        let pred = array![3.0, 5.0];
        let target = array![1.0, 2.0];
        // ((2)^2 + (3)^2) / 2 = 6.5
        assert_eq!(MSELoss.loss(&pred, &target), 6.5);
    }

    #[test]
    fn test_mse_loss_perfect_prediction() {
        let pred = array![1.0, -2.0, 3.5];
        assert_eq!(MSELoss.loss(&pred, &pred.clone()), 0.0);
    }

    #[test]
    fn test_mse_grad_is_residual_over_n() {
        let pred = array![3.0, 5.0, 0.0, 1.0];
        let target = array![1.0, 2.0, 4.0, 1.0];
        let grad = MSELoss.grad_wrt_prediction(&pred, &target);
        assert_eq!(grad.to_vec(), vec![0.5, 0.75, -1.0, 0.0]);
    }
}
