//! Core traits for preprocessing transformers.
//!
//! - [`Transformer`]: used during fitting; learns parameters from data.
//! - [`FittedTransformer`]: after fitting; applies and reverts the transformation.

use crate::error::Result;

/// Unfitted transformer.
///
/// Learns its parameters from training data and produces the corresponding
/// fitted transformer.
pub trait Transformer: Clone {
    type Input;
    type Output;
    type Fitted: FittedTransformer<Input = Self::Input, Output = Self::Output>;

    /// Fit the transformer to the training data.
    fn fit(&self, data: &Self::Input) -> Result<Self::Fitted>;

    /// Fit, then transform the same data.
    fn fit_transform(&self, data: &Self::Input) -> Result<Self::Output> {
        let fitted = self.fit(data)?;
        Ok(fitted.transform(data))
    }
}

/// Fitted transformer ready for inference.
///
/// `inverse_transform(transform(x))` recovers `x` up to rounding.
pub trait FittedTransformer: Clone {
    type Input;
    type Output;

    fn transform(&self, data: &Self::Input) -> Self::Output;

    fn inverse_transform(&self, data: &Self::Output) -> Self::Input;
}
