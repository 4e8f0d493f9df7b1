//! Input preprocessing.
//!
//! Transformers follow the same type-state split as models: an unfitted
//! [`Transformer`] learns its parameters from training data and returns a
//! [`FittedTransformer`] that applies them.
//!
//! # Example
//!
//! ```rust
//! use ndarray::array;
//! use price_estimator::preprocessing::{FittedTransformer, MaxScaler, Transformer};
//!
//! let mileages = array![10_000.0, 20_000.0, 40_000.0];
//! let fitted = MaxScaler::new().fit(&mileages).unwrap();
//!
//! assert_eq!(fitted.scale(), 40_000.0);
//! assert_eq!(fitted.transform(&mileages).to_vec(), vec![0.25, 0.5, 1.0]);
//! ```

pub mod scaling;
pub mod traits;

pub use scaling::{FittedMaxScaler, MaxScaler};
pub use traits::{FittedTransformer, Transformer};
