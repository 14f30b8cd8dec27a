//! Application configuration.
//!
//! Loaded from a JSON file; every field has a default, so `{}` is a valid
//! config and a partial file only overrides what it names.
//!
//! ```json
//! {
//!   "training": { "learning_rate": 0.02, "n_iterations": 2000 },
//!   "data": { "n_samples": 150, "noise_std": 2.0, "seed": 42 }
//! }
//! ```

use crate::dataset::SyntheticConfig;
use crate::error::{GdError, Result};
use crate::explain::ExplainConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_LEARNING_RATE: f64 = 0.02;
pub const DEFAULT_N_ITERATIONS: usize = 2000;
pub const DEFAULT_LOG_EVERY: usize = 200;

/// Hyperparameters of the gradient-descent regressor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Step size α.
    pub learning_rate: f64,
    /// Iteration budget n.
    pub n_iterations: usize,
    /// Progress is logged every this many iterations; 0 disables it.
    pub log_every: usize,
    /// Opt-in early stop when the cost changes by less than this.
    pub tolerance: Option<f64>,
    /// Opt-in failure on a non-finite cost.
    pub check_divergence: bool,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            learning_rate: DEFAULT_LEARNING_RATE,
            n_iterations: DEFAULT_N_ITERATIONS,
            log_every: DEFAULT_LOG_EVERY,
            tolerance: None,
            check_divergence: false,
        }
    }
}

impl TrainingConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(GdError::InvalidHyperparameter(format!(
                "learning_rate must be a positive finite number, got {}",
                self.learning_rate
            )));
        }
        if self.n_iterations == 0 {
            return Err(GdError::InvalidHyperparameter(
                "n_iterations must be at least 1".into(),
            ));
        }
        if let Some(tol) = self.tolerance {
            if !tol.is_finite() || tol <= 0.0 {
                return Err(GdError::InvalidHyperparameter(format!(
                    "tolerance must be a positive finite number, got {}",
                    tol
                )));
            }
        }
        Ok(())
    }
}

/// Top-level configuration for the `linfit-gd` binary.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub training: TrainingConfig,
    pub data: SyntheticConfig,
    pub explain: ExplainConfig,
}

impl AppConfig {
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("loading config from {}", path.display());
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        self.training.validate()?;
        self.data.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let cfg = TrainingConfig::default();
        assert_eq!(cfg.learning_rate, 0.02);
        assert_eq!(cfg.n_iterations, 2000);
        assert_eq!(cfg.log_every, 200);
        assert!(cfg.tolerance.is_none());
        assert!(!cfg.check_divergence);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_empty_json_is_default() {
        let cfg = AppConfig::from_json_str("{}").unwrap();
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn test_partial_json_overrides() {
        let cfg = AppConfig::from_json_str(
            r#"{"training": {"learning_rate": 0.01}, "data": {"seed": 7}}"#,
        )
        .unwrap();
        assert_eq!(cfg.training.learning_rate, 0.01);
        assert_eq!(cfg.training.n_iterations, 2000);
        assert_eq!(cfg.data.seed, 7);
        assert_eq!(cfg.data.n_samples, 150);
    }

    #[test]
    fn test_malformed_json() {
        let err = AppConfig::from_json_str("{\"training\": ").unwrap_err();
        assert!(matches!(err, GdError::Config(_)));
    }

    #[test]
    fn test_validate_rejects_bad_learning_rate() {
        for lr in [0.0, -0.1, f64::NAN, f64::INFINITY] {
            let cfg = TrainingConfig {
                learning_rate: lr,
                ..Default::default()
            };
            assert!(matches!(
                cfg.validate(),
                Err(GdError::InvalidHyperparameter(_))
            ));
        }
    }

    #[test]
    fn test_validate_rejects_zero_iterations() {
        let cfg = TrainingConfig {
            n_iterations: 0,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_tolerance() {
        let cfg = TrainingConfig {
            tolerance: Some(-1e-9),
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_from_file() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let mut file = tempfile::NamedTempFile::new()?;
        write!(file, r#"{{"training": {{"n_iterations": 50}}}}"#)?;
        let cfg = AppConfig::from_file(file.path())?;
        assert_eq!(cfg.training.n_iterations, 50);
        Ok(())
    }

    #[test]
    fn test_from_missing_file() {
        let err = AppConfig::from_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, GdError::Io(_)));
    }
}
