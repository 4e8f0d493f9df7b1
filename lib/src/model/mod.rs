//! Models with compile-time training state.

pub mod state;
pub use state::{Fitted, Unfitted};

pub mod linear;
pub use linear::{estimate, LinearModel, LinearParams, LinearRegression};

/// Training-side interface of a model: forward pass, gradients and parameter updates.
pub trait TrainableModel {
    type Input;
    type Prediction;
    type Params;
    type Gradients;
    type Output;

    fn forward(&self, input: &Self::Input) -> Self::Prediction;
    fn backward(&self, input: &Self::Input, grad_output: &Self::Prediction) -> Self::Gradients;
    fn params(&self) -> &Self::Params;
    fn update_params(&mut self, new_params: &Self::Params);

    fn into_fitted(self) -> Self::Output;
}

/// Arithmetic on parameter sets, used by optimizers.
pub trait ParamOps: Clone {
    fn add(&self, other: &Self) -> Self;
    fn scale(&self, factor: f64) -> Self;
    /// `true` when every parameter is a finite number.
    fn is_finite(&self) -> bool;
}

/// Inference-side interface of a trained model.
pub trait InferenceModel {
    type InputSingle;
    type OutputSingle;
    type InputBatch;
    type OutputBatch;
    type ParamsRepr;

    fn predict(&self, input: &Self::InputSingle) -> Self::OutputSingle;
    fn predict_batch(&self, input: &Self::InputBatch) -> Self::OutputBatch;

    /// Plain, serializable view of the learned parameters.
    fn extract_params(&self) -> Self::ParamsRepr;

    fn from_params(params: Self::ParamsRepr) -> crate::error::Result<Self>
    where
        Self: Sized;
}
