//! Training data for mileage/price regression.
//!
//! A [`Dataset`] is a fixed-size, ordered, non-empty sequence of
//! [`Observation`]s stored column-wise so the trainer can work on whole
//! columns at once.
//!
//! # Example
//!
//! ```rust
//! use price_estimator::dataset::{Dataset, Observation};
//!
//! let dataset = Dataset::new(vec![
//!     Observation::new(10_000.0, 8_000.0),
//!     Observation::new(20_000.0, 7_000.0),
//! ])
//! .unwrap();
//!
//! assert_eq!(dataset.len(), 2);
//! assert_eq!(dataset.max_mileage(), 20_000.0);
//! ```

use crate::error::{RegressionError, Result};
use ndarray::Array1;
use serde::{Deserialize, Serialize};

pub mod loader;
pub use self::loader::CsvLoader;

/// A single labeled sample: a vehicle's mileage and its price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub mileage: f64,
    pub price: f64,
}

impl Observation {
    pub fn new(mileage: f64, price: f64) -> Self {
        Self { mileage, price }
    }
}

/// In-memory training set.
///
/// Invariants enforced at construction:
/// - at least one observation
/// - every mileage and price is finite
#[derive(Debug, Clone)]
pub struct Dataset {
    mileages: Array1<f64>,
    prices: Array1<f64>,
}

impl Dataset {
    /// Builds a dataset from observations, preserving their order.
    ///
    /// # Errors
    /// - [`RegressionError::MissingInput`] if `observations` is empty
    /// - [`RegressionError::InvalidValue`] if any value is NaN or infinite
    pub fn new(observations: Vec<Observation>) -> Result<Self> {
        let (mileages, prices): (Vec<f64>, Vec<f64>) = observations
            .into_iter()
            .map(|o| (o.mileage, o.price))
            .unzip();
        Self::from_columns(mileages, prices)
    }

    /// Builds a dataset from parallel mileage and price columns.
    pub fn from_columns(mileages: Vec<f64>, prices: Vec<f64>) -> Result<Self> {
        if mileages.len() != prices.len() {
            return Err(RegressionError::InvalidValue(format!(
                "mileage and price columns differ in length ({} vs {})",
                mileages.len(),
                prices.len()
            )));
        }
        if mileages.is_empty() {
            return Err(RegressionError::MissingInput(
                "training set contains no observations".to_string(),
            ));
        }
        for (i, (m, p)) in mileages.iter().zip(prices.iter()).enumerate() {
            if !m.is_finite() || !p.is_finite() {
                return Err(RegressionError::InvalidValue(format!(
                    "observation {} is not finite (mileage = {}, price = {})",
                    i, m, p
                )));
            }
        }

        Ok(Self {
            mileages: Array1::from(mileages),
            prices: Array1::from(prices),
        })
    }

    pub fn len(&self) -> usize {
        self.mileages.len()
    }

    /// Always `false` for a constructed dataset; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.mileages.is_empty()
    }

    pub fn mileages(&self) -> &Array1<f64> {
        &self.mileages
    }

    pub fn prices(&self) -> &Array1<f64> {
        &self.prices
    }

    /// Largest mileage in the set.
    pub fn max_mileage(&self) -> f64 {
        self.mileages.fold(f64::NEG_INFINITY, |acc, &m| acc.max(m))
    }

    /// Smallest mileage in the set.
    pub fn min_mileage(&self) -> f64 {
        self.mileages.fold(f64::INFINITY, |acc, &m| acc.min(m))
    }

    /// Iterates observations in their original order.
    pub fn iter(&self) -> impl Iterator<Item = Observation> + '_ {
        self.mileages
            .iter()
            .zip(self.prices.iter())
            .map(|(&mileage, &price)| Observation { mileage, price })
    }
}
