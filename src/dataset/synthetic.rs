use super::Dataset;
use crate::error::{GdError, Result};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

/// Settings for noisy samples around `y = true_slope·x + true_intercept`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyntheticConfig {
    pub n_samples: usize,
    pub true_slope: f64,
    pub true_intercept: f64,
    /// Standard deviation of the Gaussian noise added to every target.
    pub noise_std: f64,
    pub seed: u64,
    pub x_min: f64,
    pub x_max: f64,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            n_samples: 150,
            true_slope: 2.5,
            true_intercept: 5.0,
            noise_std: 2.0,
            seed: 42,
            x_min: 0.0,
            x_max: 10.0,
        }
    }
}

/// The line the samples were drawn around.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrueParams {
    pub slope: f64,
    pub intercept: f64,
    pub noise_std: f64,
}

#[derive(Clone, Debug)]
pub struct SyntheticData {
    pub dataset: Dataset,
    pub truth: TrueParams,
}

impl SyntheticConfig {
    pub fn validate(&self) -> Result<()> {
        if self.n_samples == 0 {
            return Err(GdError::EmptyDataset);
        }
        if !self.noise_std.is_finite() || self.noise_std < 0.0 {
            return Err(GdError::InvalidHyperparameter(format!(
                "noise_std must be a finite non-negative number, got {}",
                self.noise_std
            )));
        }
        if !self.x_min.is_finite() || !self.x_max.is_finite() {
            return Err(GdError::InvalidHyperparameter(
                "x range must be finite".into(),
            ));
        }
        Ok(())
    }

    pub fn truth(&self) -> TrueParams {
        TrueParams {
            slope: self.true_slope,
            intercept: self.true_intercept,
            noise_std: self.noise_std,
        }
    }

    /// Draws the samples. Same config, same seed → same data.
    ///
    /// `x` is evenly spaced over `[x_min, x_max]` including both ends; each
    /// target gets independent `N(0, noise_std²)` noise from a ChaCha8 stream
    /// seeded with `seed`.
    pub fn generate(&self) -> Result<SyntheticData> {
        self.validate()?;
        let normal = Normal::new(0.0, self.noise_std)
            .map_err(|e| GdError::InvalidHyperparameter(e.to_string()))?;
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);

        let x = linspace(self.x_min, self.x_max, self.n_samples);
        let y = x
            .iter()
            .map(|x| self.true_slope * x + self.true_intercept + normal.sample(&mut rng))
            .collect();

        log::debug!(
            "generated {} samples around y = {}x + {} (noise σ = {}, seed = {})",
            self.n_samples,
            self.true_slope,
            self.true_intercept,
            self.noise_std,
            self.seed
        );
        Ok(SyntheticData {
            dataset: Dataset::new(x, y)?,
            truth: self.truth(),
        })
    }
}

/// `n` evenly spaced values from `start` to `stop` inclusive.
///
/// `n == 1` gives `[start]`, `n == 0` an empty vector.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            let mut out: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
            out[n - 1] = stop;
            out
        }
    }
}
