//! Error types for training, data loading and configuration.

use thiserror::Error;

/// Error type for every fallible operation in the library apart from the
/// explanation client (see [`ExplainError`](crate::explain::ExplainError)).
#[derive(Debug, Error)]
pub enum GdError {
    /// Feature and target sequences differ in length.
    #[error("input shape mismatch: x has {x_len} samples, y has {y_len}")]
    InputShape { x_len: usize, y_len: usize },

    /// No samples to train on.
    #[error("dataset is empty")]
    EmptyDataset,

    /// Cost became non-finite while the divergence check was enabled.
    #[error("cost diverged to {cost} at iteration {iteration}; lower the learning rate")]
    Divergence { iteration: usize, cost: f64 },

    /// Invalid hyperparameter or generator setting.
    #[error("invalid parameter: {0}")]
    InvalidHyperparameter(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),

    /// Rendering or writing a chart failed.
    #[error("plot error: {0}")]
    Plot(String),
}

pub type Result<T, E = GdError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_input_shape() {
        let err = GdError::InputShape { x_len: 3, y_len: 2 };
        assert_eq!(
            err.to_string(),
            "input shape mismatch: x has 3 samples, y has 2"
        );
    }

    #[test]
    fn test_error_display_divergence() {
        let err = GdError::Divergence {
            iteration: 7,
            cost: f64::INFINITY,
        };
        let msg = err.to_string();
        assert!(msg.contains("iteration 7"));
        assert!(msg.contains("inf"));
    }

    #[test]
    fn test_error_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let err: GdError = io_err.into();
        assert!(matches!(err, GdError::Io(_)));
    }

    #[test]
    fn test_error_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: GdError = json_err.into();
        assert!(matches!(err, GdError::Config(_)));
    }
}
