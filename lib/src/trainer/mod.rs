// trainer/mod.rs
use crate::{
    dataset::{Dataset, Observation},
    error::{RegressionError, Result},
    loss::{Loss, MSELoss},
    model::{Fitted, InferenceModel, LinearModel, LinearRegression, ParamOps, TrainableModel},
    optimizer::{GradientDescent, Optimizer},
    preprocessing::{FittedMaxScaler, FittedTransformer, MaxScaler, Transformer},
    serialization::ModelParams,
};
use log::{debug, info};

/// Orchestrates batch gradient descent for a mileage/price linear model.
///
/// Each run:
/// 1. fits a [`MaxScaler`] on the mileages and normalizes them into `[0, 1]`
///    (fails with [`RegressionError::DegenerateScale`] when every mileage is zero);
/// 2. starts from `intercept = slope = 0` and performs `iterations` full-batch
///    updates, each computing every residual from the same parameter snapshot
///    before either parameter moves;
/// 3. divides the learned slope by the scale so the returned model works on
///    raw mileages.
///
/// Reductions over the training set use `ndarray`'s `sum`/`dot`, which
/// accumulate in several partial sums rather than strictly left to right.
/// Results may therefore differ from a naive loop, and between permutations of
/// the same data, in the last bits only.
///
/// Once built via [`TrainerBuilder`] a trainer is immutable and reusable.
#[derive(Debug, Clone)]
pub struct Trainer {
    pub(crate) iterations: usize,
    pub(crate) detect_divergence: bool,
    pub(crate) verbose: bool,
    pub(crate) log_interval: usize,
    pub(crate) loss_fn: MSELoss,
    pub(crate) optimizer: GradientDescent,
}

/// Fluent builder for a [`Trainer`].
///
/// Defaults:
/// - `learning_rate`: 0.1
/// - `iterations`: 5000
/// - `detect_divergence`: true
/// - `verbose`: true
/// - `log_interval`: 500
#[derive(Debug, Clone)]
pub struct TrainerBuilder {
    learning_rate: f64,
    iterations: usize,
    detect_divergence: bool,
    verbose: bool,
    log_interval: usize,
}

impl Default for TrainerBuilder {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            iterations: 5000,
            detect_divergence: true,
            verbose: true,
            log_interval: 500,
        }
    }
}

impl TrainerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn learning_rate(mut self, lr: f64) -> Self {
        self.learning_rate = lr;
        self
    }

    /// Number of full-batch updates. Zero returns the initial `(0, 0)` model.
    pub fn iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// When `true`, a non-finite update aborts the run with
    /// [`RegressionError::Divergence`]. When `false`, the run completes and
    /// whatever the parameters became is returned.
    pub fn detect_divergence(mut self, detect: bool) -> Self {
        self.detect_divergence = detect;
        self
    }

    /// Sets verbosity for training output.
    ///
    /// When `false`, suppresses the periodic loss lines (logged at `debug`).
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn log_interval(mut self, interval: usize) -> Self {
        self.log_interval = interval;
        self
    }

    /// # Errors
    /// [`RegressionError::InvalidParameter`] if the learning rate is not a
    /// finite positive number or the log interval is zero.
    pub fn build(self) -> Result<Trainer> {
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(RegressionError::InvalidParameter(format!(
                "learning rate must be a finite positive number, got {}",
                self.learning_rate
            )));
        }
        if self.log_interval == 0 {
            return Err(RegressionError::InvalidParameter(
                "log interval must be at least 1".to_string(),
            ));
        }

        Ok(Trainer {
            iterations: self.iterations,
            detect_divergence: self.detect_divergence,
            verbose: self.verbose,
            log_interval: self.log_interval,
            loss_fn: MSELoss,
            optimizer: GradientDescent::new(self.learning_rate),
        })
    }
}

/// Outcome of a training run.
#[derive(Debug, Clone)]
pub struct TrainedModel {
    /// Fitted model in original mileage units.
    pub model: LinearModel<Fitted>,
    /// Normalization applied during the run.
    pub scaler: FittedMaxScaler,
    /// Mean squared error of `model` on the training set, in price units squared.
    pub training_loss: f64,
}

impl TrainedModel {
    pub fn intercept(&self) -> f64 {
        self.model.intercept()
    }

    pub fn slope(&self) -> f64 {
        self.model.slope()
    }

    /// Persistable record, optionally carrying the normalization scale.
    pub fn to_params(&self, persist_scale: bool) -> ModelParams {
        let params = self.model.extract_params();
        if persist_scale {
            params.with_max_mileage(self.scaler.scale())
        } else {
            params
        }
    }
}

impl Trainer {
    /// Convenience constructor that starts the builder pattern.
    pub fn builder() -> TrainerBuilder {
        TrainerBuilder::new()
    }

    pub fn learning_rate(&self) -> f64 {
        self.optimizer.learning_rate()
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Trains a fresh model on `dataset`.
    ///
    /// # Errors
    /// - [`RegressionError::MissingInput`] for an empty dataset
    /// - [`RegressionError::DegenerateScale`] when every mileage is zero
    /// - [`RegressionError::Divergence`] when divergence detection is on and
    ///   an update produces non-finite parameters
    pub fn fit(&self, dataset: &Dataset) -> Result<TrainedModel> {
        if dataset.is_empty() {
            return Err(RegressionError::MissingInput("dataset is empty".into()));
        }

        let scaler = MaxScaler::new().fit(dataset.mileages())?;
        let x = scaler.transform(dataset.mileages());
        let y = dataset.prices();
        info!(
            "training on {} observations: scale = {}, learning rate = {}, iterations = {}",
            dataset.len(),
            scaler.scale(),
            self.learning_rate(),
            self.iterations
        );

        let mut model = LinearRegression::new();
        for iteration in 0..self.iterations {
            let preds = model.forward(&x);
            let grad_preds = self.loss_fn.grad_wrt_prediction(&preds, y);
            let grads = model.backward(&x, &grad_preds);
            let new_params = self.optimizer.step(model.params(), &grads);

            if self.detect_divergence && !new_params.is_finite() {
                return Err(RegressionError::Divergence { iteration });
            }
            model.update_params(&new_params);

            if self.verbose && iteration % self.log_interval == 0 {
                debug!(
                    "iteration {}: loss = {}",
                    iteration,
                    self.loss_fn.loss(&preds, y)
                );
            }
        }

        let normalized = model.into_fitted();
        let fitted = LinearModel::<Fitted>::new(scaler.denormalize(normalized.params()));
        let training_loss = self.loss_fn.loss(&fitted.predict_batch(dataset.mileages()), y);
        info!(
            "trained: theta0 = {:.6}, theta1 = {:.6}, mse = {:.3}",
            fitted.intercept(),
            fitted.slope(),
            training_loss
        );

        Ok(TrainedModel {
            model: fitted,
            scaler,
            training_loss,
        })
    }
}

/// Fits `price = intercept + slope × mileage` and returns `(intercept, slope)`
/// in original mileage units.
///
/// Shorthand for a [`Trainer`] with the given hyperparameters and the other
/// options at their defaults.
///
/// ```rust
/// use price_estimator::dataset::Observation;
/// use price_estimator::trainer::fit;
///
/// let data = [
///     Observation::new(10_000.0, 8_000.0),
///     Observation::new(20_000.0, 7_000.0),
///     Observation::new(30_000.0, 6_000.0),
///     Observation::new(40_000.0, 5_000.0),
/// ];
/// let (theta0, theta1) = fit(&data, 0.1, 5000).unwrap();
/// // price = 9000 - 0.1 × mileage
/// assert!((theta0 - 9_000.0).abs() < 50.0);
/// assert!((theta1 + 0.1).abs() < 0.01);
/// ```
pub fn fit(observations: &[Observation], learning_rate: f64, iterations: usize) -> Result<(f64, f64)> {
    if observations.is_empty() {
        return Err(RegressionError::MissingInput(
            "no observations to train on".to_string(),
        ));
    }
    let dataset = Dataset::new(observations.to_vec())?;
    let trained = Trainer::builder()
        .learning_rate(learning_rate)
        .iterations(iterations)
        .build()?
        .fit(&dataset)?;
    Ok((trained.intercept(), trained.slope()))
}
