/// A marker type indicating that a model is **not yet trained**.
///
/// Used as the state parameter of [`LinearModel`](crate::model::linear::LinearModel):
/// - Training methods (`forward`, `backward`, `update_params`) require an `Unfitted` model.
/// - Inference methods (`predict`) are **not available** until the model is converted to `Fitted`.
pub struct Unfitted;

/// A marker type indicating that a model has been **fully trained**.
///
/// A `Fitted` model holds only inference parameters in original mileage units,
/// with no optimizer state, loss function or normalization left to apply.
pub struct Fitted;
