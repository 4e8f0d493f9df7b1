//! # price-estimator
//!
//! Estimates a car's price from its mileage with a single-feature linear model
//! `price = θ0 + θ1 × mileage`, fitted by full-batch gradient descent on
//! max-normalized mileage.
//!
//! ## Core Design Principles
//!
//! - **Stateful Type Safety**: Models carry their training state in the type system
//!   (`Unfitted` vs `Fitted`), so only a trained model can `predict`.
//! - **Training/Inference Separation**: A fitted model holds only `θ0`/`θ1` in
//!   original mileage units; normalization, losses and optimizers live in the
//!   training components.
//! - **Explicit Hyperparameters**: Learning rate, iteration count and the other
//!   options are inputs of one [`trainer::Trainer`], not baked into variants.
//!
//! ## Quick Start
//!
//! ```rust
//! use price_estimator::dataset::{Dataset, Observation};
//! use price_estimator::model::InferenceModel;
//! use price_estimator::trainer::Trainer;
//!
//! let dataset = Dataset::new(vec![
//!     Observation::new(10_000.0, 8_000.0),
//!     Observation::new(20_000.0, 7_000.0),
//!     Observation::new(30_000.0, 6_000.0),
//!     Observation::new(40_000.0, 5_000.0),
//! ])
//! .unwrap();
//!
//! let trained = Trainer::builder()
//!     .learning_rate(0.1)
//!     .iterations(5000)
//!     .build()
//!     .unwrap()
//!     .fit(&dataset)
//!     .unwrap();
//!
//! let price = trained.model.predict(&25_000.0);
//! assert!((price - 6_500.0).abs() < 50.0);
//! ```
//!
//! ## Module Structure
//!
//! - `dataset`: Observations, in-memory datasets and the CSV loader
//! - `preprocessing`: Max scaling of the mileage feature
//! - `model`: Linear model with stateful type parameters and [`model::estimate`]
//! - `loss`: Mean squared error and its gradient
//! - `optimizer`: Gradient descent update rule
//! - `trainer`: Training loop orchestration and divergence detection
//! - `serialization`: JSON parameter artifact with atomic writes
//! - `config`: Training configuration file
//! - `metrics`: MSE, RMSE, MAE and R²
//! - `plot`: SVG charts (feature `plot`)
//! - `cli`: Command-line interface and interactive prompt

/// Error type shared by every module.
pub mod error;

/// Data loading utilities and dataset abstractions.
pub mod dataset;

/// Feature scaling transformers.
pub mod preprocessing;

/// Differentiable loss functions for model training.
pub mod loss;

/// Linear model with compile-time state safety.
pub mod model;

/// Optimization algorithms for parameter updates.
pub mod optimizer;

/// High-level training loop orchestration.
pub mod trainer;

/// Model persistence.
pub mod serialization;

pub mod config;

/// Regression quality metrics.
pub mod metrics;

#[cfg(feature = "plot")]
pub mod plot;

pub mod cli;

pub use error::{RegressionError, Result};
pub use model::estimate;
pub use serialization::{load_parameters, save_parameters, ModelParams};
pub use trainer::{fit, Trainer};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loss::{Loss, MSELoss};
    use crate::model::{InferenceModel, LinearRegression, TrainableModel};
    use crate::optimizer::{GradientDescent, Optimizer};
    use crate::preprocessing::{FittedTransformer, MaxScaler, Transformer};
    use ndarray::array;

    #[test]
    fn test_manual_training_loop_matches_trainer() {
        // y = 2x + 1 on mileages up to 4
        let x_raw = array![1.0, 2.0, 3.0, 4.0];
        let y = array![3.0, 5.0, 7.0, 9.0];

        let scaler = MaxScaler::new().fit(&x_raw).unwrap();
        let x = scaler.transform(&x_raw);

        let mut regressor = LinearRegression::new();
        let loss_fn = MSELoss;
        let optimizer = GradientDescent::new(0.5);

        let mut last_loss = f64::INFINITY;
        for _ in 0..2000 {
            let pred = regressor.forward(&x);
            let grad_pred = loss_fn.grad_wrt_prediction(&pred, &y);
            let grads = regressor.backward(&x, &grad_pred);
            let new_params = optimizer.step(regressor.params(), &grads);
            regressor.update_params(&new_params);
            last_loss = loss_fn.loss(&pred, &y);
        }
        assert!(last_loss < 1e-10, "loss = {}", last_loss);

        let fitted = model::LinearModel::<model::Fitted>::new(scaler.denormalize(regressor.params()));
        assert!((fitted.intercept() - 1.0).abs() < 1e-5);
        assert!((fitted.slope() - 2.0).abs() < 1e-5);

        let dataset = dataset::Dataset::from_columns(x_raw.to_vec(), y.to_vec()).unwrap();
        let trained = Trainer::builder()
            .learning_rate(0.5)
            .iterations(2000)
            .verbose(false)
            .build()
            .unwrap()
            .fit(&dataset)
            .unwrap();
        assert_eq!(trained.intercept(), fitted.intercept());
        assert_eq!(trained.slope(), fitted.slope());
        assert!((trained.model.predict(&10.0) - 21.0).abs() < 1e-4);
    }

    #[test]
    fn test_untrained_predictor_is_zero() {
        let dir = tempfile::tempdir().unwrap();
        let params = load_parameters(dir.path().join("model.json")).unwrap();
        assert_eq!(estimate(40_000.0, params.theta0, params.theta1), 0.0);
    }
}
