//! Max Scaler.
//!
//! Divides every value by the largest value seen during fit. For
//! non-negative mileages this maps the training set into `[0, 1]`, which
//! keeps gradient magnitudes bounded whatever the raw mileage range is.
//!
//! It does not shift the data, so a linear model fitted on scaled input keeps
//! its intercept and only needs its slope divided by the scale to return to
//! original units (see [`FittedMaxScaler::denormalize`]).

use crate::error::{RegressionError, Result};
use crate::model::LinearParams;
use crate::preprocessing::traits::{FittedTransformer, Transformer};
use ndarray::Array1;

/// MaxScaler transformer (unfitted).
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxScaler;

impl MaxScaler {
    pub fn new() -> Self {
        Self
    }
}

impl Transformer for MaxScaler {
    type Input = Array1<f64>;
    type Output = Array1<f64>;
    type Fitted = FittedMaxScaler;

    /// # Errors
    /// - [`RegressionError::MissingInput`] on empty data
    /// - [`RegressionError::DegenerateScale`] when the maximum is zero
    /// - [`RegressionError::InvalidValue`] when the maximum is not finite
    fn fit(&self, data: &Array1<f64>) -> Result<FittedMaxScaler> {
        if data.is_empty() {
            return Err(RegressionError::MissingInput(
                "cannot fit MaxScaler on empty data".to_string(),
            ));
        }

        let max = data.fold(f64::NEG_INFINITY, |acc, &v| acc.max(v));
        if max == 0.0 {
            return Err(RegressionError::DegenerateScale);
        }
        if !max.is_finite() {
            return Err(RegressionError::InvalidValue(format!(
                "maximum {} is not a usable scale",
                max
            )));
        }

        Ok(FittedMaxScaler { scale: max })
    }
}

/// Fitted MaxScaler. The scale is fixed once fitted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FittedMaxScaler {
    scale: f64,
}

impl FittedMaxScaler {
    /// The training maximum every value is divided by.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Converts parameters learned on scaled input back to original units.
    ///
    /// `intercept + slope × (x / scale)` equals
    /// `intercept + (slope / scale) × x`, so only the slope changes.
    pub fn denormalize(&self, params: &LinearParams) -> LinearParams {
        LinearParams {
            intercept: params.intercept,
            slope: params.slope / self.scale,
        }
    }
}

impl FittedTransformer for FittedMaxScaler {
    type Input = Array1<f64>;
    type Output = Array1<f64>;

    fn transform(&self, data: &Array1<f64>) -> Array1<f64> {
        data / self.scale
    }

    fn inverse_transform(&self, data: &Array1<f64>) -> Array1<f64> {
        data * self.scale
    }
}
