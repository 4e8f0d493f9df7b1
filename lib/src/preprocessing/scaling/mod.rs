//! Scaling transformers.
//!
//! | Transformer | Description |
//! |-------------|-------------|
//! | [`MaxScaler`] | Divide by the training maximum; pure scale, no shift |

pub mod max;

pub use max::{FittedMaxScaler, MaxScaler};
