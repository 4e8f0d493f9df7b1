//! Persistence of fitted model parameters.
//!
//! The artifact is a JSON object:
//!
//! ```json
//! {"theta0": 8499.59, "theta1": -0.0214, "max_mileage": 240000.0}
//! ```
//!
//! `theta0`/`theta1` are the intercept and slope in original mileage units.
//! `max_mileage` is the normalization scale of the training run; it is
//! informational only and may be absent.
//!
//! Writes are atomic: the record goes to a temporary file in the target
//! directory which then replaces the destination.

use crate::error::{RegressionError, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::io::{ErrorKind, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Serializable representation of a fitted linear model.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ModelParams {
    pub theta0: f64,
    pub theta1: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_mileage: Option<f64>,
}

impl ModelParams {
    pub fn new(theta0: f64, theta1: f64) -> Self {
        Self {
            theta0,
            theta1,
            max_mileage: None,
        }
    }

    /// Attaches the normalization scale as metadata.
    pub fn with_max_mileage(mut self, max_mileage: f64) -> Self {
        self.max_mileage = Some(max_mileage);
        self
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Writes `params` to `path`, atomically replacing any previous artifact.
///
/// # Errors
/// [`RegressionError::InvalidValue`] if a parameter is not finite (JSON has
/// no representation for NaN or infinity), otherwise I/O errors.
pub fn save_parameters<P: AsRef<Path>>(path: P, params: &ModelParams) -> Result<()> {
    let path = path.as_ref();
    if !params.theta0.is_finite() || !params.theta1.is_finite() {
        return Err(RegressionError::InvalidValue(format!(
            "refusing to save non-finite parameters (theta0 = {}, theta1 = {})",
            params.theta0, params.theta1
        )));
    }

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(params.to_json()?.as_bytes())?;
    tmp.write_all(b"\n")?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| RegressionError::Io(e.error))?;

    debug!("saved model parameters to {}", path.display());
    Ok(())
}

/// Reads parameters from `path`.
///
/// A missing file is not an error: a warning is logged and the zero model
/// `(theta0 = 0, theta1 = 0)` is returned, so an untrained predictor
/// estimates a flat price of zero.
///
/// # Errors
/// [`RegressionError::Serialization`] for a malformed artifact, I/O errors
/// other than "not found".
pub fn load_parameters<P: AsRef<Path>>(path: P) -> Result<ModelParams> {
    let path = path.as_ref();
    match std::fs::read_to_string(path) {
        Ok(text) => {
            let params = ModelParams::from_json(&text)?;
            debug!("loaded model parameters from {}", path.display());
            Ok(params)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!(
                "no trained model found at {}; using theta0 = 0, theta1 = 0",
                path.display()
            );
            Ok(ModelParams::default())
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_field_names() {
        let json = ModelParams::new(1.5, -0.25).to_json().unwrap();
        assert!(json.contains("\"theta0\""));
        assert!(json.contains("\"theta1\""));
        assert!(!json.contains("max_mileage"));

        let json = ModelParams::new(1.5, -0.25)
            .with_max_mileage(240_000.0)
            .to_json()
            .unwrap();
        assert!(json.contains("\"max_mileage\""));
    }

    #[test]
    fn test_from_json_without_max_mileage() {
        let params = ModelParams::from_json(r#"{"theta0": 8000.5, "theta1": -0.02}"#).unwrap();
        assert_eq!(params, ModelParams::new(8000.5, -0.02));
    }

    #[test]
    fn test_from_json_malformed() {
        let err = ModelParams::from_json(r#"{"theta0": "abc"}"#).unwrap_err();
        assert!(matches!(err, RegressionError::Serialization(_)));
    }

    #[test]
    fn test_save_load() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let tmp = tempfile::tempdir()?;
        let path = tmp.path().join("model.json");
        let params = ModelParams::new(8_499.599_649_5, -0.021_448_963).with_max_mileage(240_000.0);

        save_parameters(&path, &params)?;
        let loaded = load_parameters(&path)?;

        assert_eq!(loaded, params);
        Ok(())
    }

    #[test]
    fn test_save_overwrites_previous_artifact() -> std::result::Result<(), Box<dyn std::error::Error>>
    {
        let tmp = tempfile::tempdir()?;
        let path = tmp.path().join("model.json");

        save_parameters(&path, &ModelParams::new(1.0, 1.0).with_max_mileage(10.0))?;
        save_parameters(&path, &ModelParams::new(2.0, 2.0))?;

        assert_eq!(load_parameters(&path)?, ModelParams::new(2.0, 2.0));
        // only the artifact remains, no stray temp files
        assert_eq!(std::fs::read_dir(tmp.path())?.count(), 1);
        Ok(())
    }

    #[test]
    fn test_load_missing_file_defaults_to_zero() {
        let tmp = tempfile::tempdir().unwrap();
        let params = load_parameters(tmp.path().join("absent.json")).unwrap();

        assert_eq!(params.theta0, 0.0);
        assert_eq!(params.theta1, 0.0);
        assert_eq!(params.max_mileage, None);
    }

    #[test]
    fn test_load_twice_is_identical() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let tmp = tempfile::tempdir()?;
        let path = tmp.path().join("model.json");
        save_parameters(&path, &ModelParams::new(11_000.0, -0.3))?;

        assert_eq!(load_parameters(&path)?, load_parameters(&path)?);
        Ok(())
    }

    #[test]
    fn test_save_rejects_non_finite() {
        let tmp = tempfile::tempdir().unwrap();
        let err = save_parameters(tmp.path().join("m.json"), &ModelParams::new(f64::NAN, 0.0))
            .unwrap_err();
        assert!(matches!(err, RegressionError::InvalidValue(_)));
    }
}
