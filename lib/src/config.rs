//! Training configuration.
//!
//! A single [`TrainingConfig`] replaces per-variant copies of the training
//! program: hyperparameters are explicit inputs. It can be read from a JSON
//! file; missing fields take their defaults.
//!
//! ```rust
//! use price_estimator::config::TrainingConfig;
//!
//! let config = TrainingConfig::from_json(r#"{"learning_rate": 0.01, "iterations": 8000}"#).unwrap();
//! assert_eq!(config.iterations, 8000);
//! assert!(config.persist_scale);
//! ```

use crate::error::{RegressionError, Result};
use crate::trainer::{Trainer, TrainerBuilder};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrainingConfig {
    /// Gradient descent step size.
    pub learning_rate: f64,
    /// Number of full-batch updates.
    pub iterations: usize,
    /// Store the normalization scale (`max_mileage`) in the artifact.
    pub persist_scale: bool,
    /// Fail when parameters become non-finite instead of returning them.
    pub detect_divergence: bool,
    /// Log the training loss every this many iterations.
    pub log_interval: usize,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            iterations: 5000,
            persist_scale: true,
            detect_divergence: true,
            log_interval: 500,
        }
    }
}

impl TrainingConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads a configuration file.
    ///
    /// Unlike the training data, a missing configuration file is an error:
    /// it was asked for explicitly.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            RegressionError::InvalidParameter(format!(
                "cannot read config {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json(&text)
    }

    /// Builder preloaded with these settings.
    pub fn trainer_builder(&self) -> TrainerBuilder {
        Trainer::builder()
            .learning_rate(self.learning_rate)
            .iterations(self.iterations)
            .detect_divergence(self.detect_divergence)
            .log_interval(self.log_interval)
    }

    /// Validated trainer for these settings.
    pub fn build_trainer(&self) -> Result<Trainer> {
        self.trainer_builder().build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = TrainingConfig::default();
        assert_eq!(config.learning_rate, 0.1);
        assert_eq!(config.iterations, 5000);
        assert!(config.persist_scale);
        assert!(config.detect_divergence);
        assert_eq!(config.log_interval, 500);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = TrainingConfig::from_json(r#"{"persist_scale": false}"#).unwrap();
        assert!(!config.persist_scale);
        assert_eq!(config.learning_rate, 0.1);
        assert_eq!(config.iterations, 5000);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = TrainingConfig::from_json(r#"{"learning_rte": 0.5}"#).unwrap_err();
        assert!(matches!(err, RegressionError::Serialization(_)));
    }

    #[test]
    fn test_from_file() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("train.json");
        std::fs::write(&path, r#"{"learning_rate": 0.05, "iterations": 100}"#)?;

        let config = TrainingConfig::from_file(&path)?;
        assert_eq!(config.learning_rate, 0.05);
        assert_eq!(config.iterations, 100);
        Ok(())
    }

    #[test]
    fn test_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = TrainingConfig::from_file(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, RegressionError::InvalidParameter(_)));
    }

    #[test]
    fn test_build_trainer_validates() {
        let config = TrainingConfig {
            learning_rate: -1.0,
            ..TrainingConfig::default()
        };
        assert!(matches!(
            config.build_trainer(),
            Err(RegressionError::InvalidParameter(_))
        ));
    }
}
