//! Error types for training, persistence and prediction.

use thiserror::Error;

/// Error type for every fallible operation in the crate.
#[derive(Debug, Error)]
pub enum RegressionError {
    /// Training data source is absent or holds no observations.
    #[error("Missing input: {0}")]
    MissingInput(String),

    /// A value could not be parsed or is not a finite number.
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// Every mileage in the training set is zero, so normalization is undefined.
    #[error("Degenerate scale: all mileages are zero, cannot normalize")]
    DegenerateScale,

    /// Parameters became non-finite during gradient descent.
    #[error("Divergence: parameters became non-finite at iteration {iteration} (learning rate too large?)")]
    Divergence {
        /// Zero-based iteration whose update produced the non-finite values.
        iteration: usize,
    },

    /// Invalid hyperparameter value.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// A required CSV column is missing from the header row.
    #[error("Missing column: expected one of {expected:?}, found {found:?}")]
    MissingColumn {
        expected: &'static [&'static str],
        found: Vec<String>,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Chart rendering failed.
    #[error("Plot error: {0}")]
    Plot(String),
}

/// Result type alias for regression operations.
pub type Result<T> = std::result::Result<T, RegressionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_missing_input() {
        let err = RegressionError::MissingInput("data.csv not found".to_string());
        assert!(err.to_string().contains("Missing input"));
        assert!(err.to_string().contains("data.csv"));
    }

    #[test]
    fn test_error_display_divergence() {
        let err = RegressionError::Divergence { iteration: 42 };
        assert!(err.to_string().contains("iteration 42"));
    }

    #[test]
    fn test_error_display_missing_column() {
        let err = RegressionError::MissingColumn {
            expected: &["price"],
            found: vec!["km".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("price"));
        assert!(msg.contains("km"));
    }

    #[test]
    fn test_error_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let err: RegressionError = io_err.into();
        assert!(matches!(err, RegressionError::Io(_)));
    }

    #[test]
    fn test_error_from_serde_json_error() {
        let json_err = serde_json::from_str::<f64>("not json").unwrap_err();
        let err: RegressionError = json_err.into();
        assert!(matches!(err, RegressionError::Serialization(_)));
    }

    #[test]
    fn test_error_is_std_error() {
        let err = RegressionError::DegenerateScale;
        let _: &dyn std::error::Error = &err;
    }
}
