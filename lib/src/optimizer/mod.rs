use crate::model::linear::LinearParams;
use crate::model::ParamOps;

/// Trait for gradient-based optimizers.
///
/// Optimizers update model parameters from computed gradients. Training
/// logic (`Trainer`) stays decoupled from the update rule.
///
/// # Example
/// ```rust
/// use price_estimator::model::LinearParams;
/// use price_estimator::optimizer::{GradientDescent, Optimizer};
///
/// let gd = GradientDescent::new(0.1);
/// let params = LinearParams::new(1.0, 2.0);
/// let grads = LinearParams::new(10.0, -10.0);
/// let updated = gd.step(&params, &grads);
/// assert_eq!(updated, LinearParams::new(0.0, 3.0));
/// ```
pub trait Optimizer<P> {
    /// Performs one update:
    /// ```text
    /// params_new = params - learning_rate * gradients
    /// ```
    ///
    /// Inputs are not mutated; a new value is returned.
    fn step(&self, params: &P, gradients: &P) -> P;
}

/// Full-batch gradient descent.
///
/// ```text
/// θ ← θ - η · ∇L(θ)
/// ```
/// where `η` is the learning rate and `∇L(θ)` the gradient over the whole
/// training set. Stateless: no momentum, no adaptive rates.
#[derive(Debug, Clone, Copy)]
pub struct GradientDescent {
    lr: f64,
}

impl GradientDescent {
    /// Creates an optimizer with the given learning rate.
    ///
    /// Validation (finite, positive) is done by the trainer builder.
    pub fn new(lr: f64) -> Self {
        Self { lr }
    }

    pub fn learning_rate(&self) -> f64 {
        self.lr
    }
}

impl Optimizer<LinearParams> for GradientDescent {
    fn step(&self, params: &LinearParams, grads: &LinearParams) -> LinearParams {
        // intercept and slope both move from the same snapshot `params`
        params.add(&grads.scale(-self.lr))
    }
}
