//! Goodness-of-fit metrics for a fitted model.
//!
//! All functions take ground truth first and predictions second.

use crate::dataset::Dataset;
use crate::error::{RegressionError, Result};
use crate::model::{Fitted, InferenceModel, LinearModel};
use ndarray::Array1;
use std::fmt;

/// Metrics for evaluating regression models.
pub struct Metrics;

impl Metrics {
    fn check(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> Result<()> {
        if y_true.len() != y_pred.len() {
            return Err(RegressionError::InvalidValue(format!(
                "{} targets but {} predictions",
                y_true.len(),
                y_pred.len()
            )));
        }
        if y_true.is_empty() {
            return Err(RegressionError::MissingInput(
                "no values to evaluate".to_string(),
            ));
        }
        Ok(())
    }

    /// Mean Squared Error: `mean((y_true - y_pred)^2)`.
    pub fn mse(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> Result<f64> {
        Self::check(y_true, y_pred)?;
        let diff = y_true - y_pred;
        Ok(diff.dot(&diff) / diff.len() as f64)
    }

    /// Root Mean Squared Error, in price units.
    pub fn rmse(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> Result<f64> {
        Ok(Self::mse(y_true, y_pred)?.sqrt())
    }

    /// Mean Absolute Error: `mean(|y_true - y_pred|)`.
    pub fn mae(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> Result<f64> {
        Self::check(y_true, y_pred)?;
        let sum_abs: f64 = y_true
            .iter()
            .zip(y_pred.iter())
            .map(|(&t, &p)| (t - p).abs())
            .sum();
        Ok(sum_abs / y_true.len() as f64)
    }

    /// Coefficient of determination.
    ///
    /// R² = 1 - (SS_res / SS_tot)
    ///
    /// where:
    /// - SS_res = sum((y_true - y_pred)^2)
    /// - SS_tot = sum((y_true - mean(y_true))^2)
    ///
    /// 1 is a perfect fit; values can be negative if the model is worse than
    /// predicting the mean. A constant target scores 1 when predicted exactly
    /// and 0 otherwise.
    pub fn r_squared(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> Result<f64> {
        Self::check(y_true, y_pred)?;
        let mean_true = y_true.sum() / y_true.len() as f64;

        let residuals = y_true - y_pred;
        let ss_res = residuals.dot(&residuals);
        let ss_tot: f64 = y_true.iter().map(|&t| (t - mean_true).powi(2)).sum();

        if ss_tot == 0.0 {
            return Ok(if ss_res == 0.0 { 1.0 } else { 0.0 });
        }
        Ok(1.0 - ss_res / ss_tot)
    }

    /// Calculate all metrics at once.
    pub fn calculate_all(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> Result<RegressionMetrics> {
        let mse = Self::mse(y_true, y_pred)?;
        Ok(RegressionMetrics {
            mse,
            rmse: mse.sqrt(),
            mae: Self::mae(y_true, y_pred)?,
            r_squared: Self::r_squared(y_true, y_pred)?,
        })
    }

    /// Scores `model` against every observation in `dataset`.
    pub fn evaluate(model: &LinearModel<Fitted>, dataset: &Dataset) -> Result<RegressionMetrics> {
        let predictions = model.predict_batch(dataset.mileages());
        Self::calculate_all(dataset.prices(), &predictions)
    }
}

/// All regression metrics of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegressionMetrics {
    pub mse: f64,
    pub rmse: f64,
    pub mae: f64,
    pub r_squared: f64,
}

impl fmt::Display for RegressionMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "MSE:  {:.4}", self.mse)?;
        writeln!(f, "RMSE: {:.4}", self.rmse)?;
        writeln!(f, "MAE:  {:.4}", self.mae)?;
        write!(f, "R²:   {:.6}", self.r_squared)
    }
}
