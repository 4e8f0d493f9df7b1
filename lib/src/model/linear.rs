//! Single-feature linear model: `price = intercept + slope × mileage`.
//!
//! The model carries its training state in the type system:
//! - [`LinearRegression`] = `LinearModel<Unfitted>` is what the trainer drives.
//!   It works on whatever input scale the trainer feeds it (normalized mileage).
//! - [`LinearModel<Fitted>`] is inference-only and always expressed in original
//!   mileage units, so its parameters can be persisted and used as-is.
//!
//! The fitted model is free from training hyperparameters and normalization state.
use crate::error::{RegressionError, Result};
pub use crate::model::{Fitted, InferenceModel, ParamOps, TrainableModel, Unfitted};
use crate::serialization::ModelParams;
use ndarray::Array1;
use std::marker::PhantomData;

/// Estimated price for `mileage` under the line `intercept + slope × mileage`.
///
/// Pure and defined for any real mileage; rejecting negative mileages is the
/// caller's concern.
///
/// ```rust
/// use price_estimator::model::estimate;
///
/// assert!((estimate(25_000.0, 11_000.0, -0.3) - 3_500.0).abs() < 1e-9);
/// assert_eq!(estimate(40_000.0, 0.0, 0.0), 0.0);
/// ```
pub fn estimate(mileage: f64, intercept: f64, slope: f64) -> f64 {
    intercept + slope * mileage
}

/// Trainable parameters of a linear model.
///
/// Also used as the gradient type: `intercept` and `slope` then hold the
/// partial derivatives of the loss.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LinearParams {
    pub intercept: f64,
    pub slope: f64,
}

impl LinearParams {
    pub fn new(intercept: f64, slope: f64) -> Self {
        Self { intercept, slope }
    }

    pub fn zeros() -> Self {
        Self::default()
    }
}

impl ParamOps for LinearParams {
    fn add(&self, other: &Self) -> Self {
        Self {
            intercept: self.intercept + other.intercept,
            slope: self.slope + other.slope,
        }
    }

    fn scale(&self, factor: f64) -> Self {
        Self {
            intercept: self.intercept * factor,
            slope: self.slope * factor,
        }
    }

    fn is_finite(&self) -> bool {
        self.intercept.is_finite() && self.slope.is_finite()
    }
}

/// A linear model with state encoded at the type level.
///
/// - When `S = Unfitted`: implements [`TrainableModel`].
/// - When `S = Fitted`: implements [`InferenceModel`].
///
/// You cannot call `predict()` on an untrained model.
pub struct LinearModel<S> {
    params: LinearParams,
    _state: PhantomData<S>,
}

impl<S> Clone for LinearModel<S> {
    fn clone(&self) -> Self {
        Self {
            params: self.params,
            _state: PhantomData,
        }
    }
}

impl<S> std::fmt::Debug for LinearModel<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinearModel")
            .field("intercept", &self.params.intercept)
            .field("slope", &self.params.slope)
            .finish()
    }
}

impl LinearModel<Fitted> {
    /// Creates a fitted model from parameters in original mileage units.
    pub fn new(params: LinearParams) -> Self {
        Self {
            params,
            _state: PhantomData::<Fitted>,
        }
    }

    pub fn params(&self) -> &LinearParams {
        &self.params
    }

    pub fn intercept(&self) -> f64 {
        self.params.intercept
    }

    pub fn slope(&self) -> f64 {
        self.params.slope
    }

    /// Samples the regression line at `points` evenly spaced mileages in
    /// `[x_min, x_max]`, endpoints included.
    ///
    /// Returns `(mileage, price)` pairs ready for a chart.
    pub fn line(&self, x_min: f64, x_max: f64, points: usize) -> Vec<(f64, f64)> {
        match points {
            0 => Vec::new(),
            1 => vec![(x_min, self.predict(&x_min))],
            n => {
                let step = (x_max - x_min) / (n - 1) as f64;
                (0..n)
                    .map(|i| {
                        let x = if i == n - 1 { x_max } else { x_min + step * i as f64 };
                        (x, self.predict(&x))
                    })
                    .collect()
            }
        }
    }
}

/// Inference for a trained model: `y = intercept + slope × mileage`.
///
/// Serialization goes through [`ModelParams`] (see [`crate::serialization`]).
impl InferenceModel for LinearModel<Fitted> {
    type InputSingle = f64;
    type OutputSingle = f64;
    type InputBatch = Array1<f64>;
    type OutputBatch = Array1<f64>;
    type ParamsRepr = ModelParams;

    fn predict(&self, mileage: &f64) -> f64 {
        estimate(*mileage, self.params.intercept, self.params.slope)
    }

    fn predict_batch(&self, mileages: &Array1<f64>) -> Array1<f64> {
        mileages.mapv(|m| estimate(m, self.params.intercept, self.params.slope))
    }

    fn extract_params(&self) -> ModelParams {
        ModelParams::new(self.params.intercept, self.params.slope)
    }

    fn from_params(params: ModelParams) -> Result<Self> {
        let internal = LinearParams::new(params.theta0, params.theta1);
        if !internal.is_finite() {
            return Err(RegressionError::InvalidValue(format!(
                "model parameters are not finite (theta0 = {}, theta1 = {})",
                params.theta0, params.theta1
            )));
        }
        Ok(Self::new(internal))
    }
}

/// Training interface.
///
/// Forward pass: `intercept + slope × x` for every sample.
/// Backward pass: `∂intercept = Σ grad`, `∂slope = x · grad`.
///
/// Both passes read the same parameter snapshot; nothing changes until
/// [`TrainableModel::update_params`] is called.
impl TrainableModel for LinearModel<Unfitted> {
    type Input = Array1<f64>;
    type Prediction = Array1<f64>;
    type Params = LinearParams;
    type Gradients = LinearParams;
    type Output = LinearModel<Fitted>;

    fn forward(&self, x: &Array1<f64>) -> Array1<f64> {
        let LinearParams { intercept, slope } = self.params;
        x.mapv(|v| intercept + slope * v)
    }

    fn backward(&self, x: &Array1<f64>, grad_output: &Array1<f64>) -> LinearParams {
        LinearParams {
            intercept: grad_output.sum(),
            slope: x.dot(grad_output),
        }
    }

    fn params(&self) -> &LinearParams {
        &self.params
    }

    fn update_params(&mut self, params: &LinearParams) {
        self.params = *params;
    }

    fn into_fitted(self) -> LinearModel<Fitted> {
        LinearModel::<Fitted>::new(self.params)
    }
}

/// Alias for an **unfitted** linear regression model.
pub type LinearRegression = LinearModel<Unfitted>;

impl LinearRegression {
    /// Creates a model with zero intercept and slope.
    pub fn new() -> Self {
        Self::from_params(LinearParams::zeros())
    }

    /// Constructs a model from explicit parameters (e.g., for a warm start in tests).
    pub fn from_params(params: LinearParams) -> Self {
        Self {
            params,
            _state: PhantomData,
        }
    }
}

impl Default for LinearRegression {
    fn default() -> Self {
        Self::new()
    }
}
