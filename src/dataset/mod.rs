//! Training data for the one-feature regressor.
//!
//! - [`Dataset`] — validated, immutable `(x, y)` pairs with CSV import/export.
//! - [`SyntheticConfig`] — seeded generator of noisy samples around a known line.
//!
//! # Example
//!
//! ```rust
//! use linfit_gd::dataset::{Dataset, SyntheticConfig};
//!
//! let data = SyntheticConfig::default().generate().unwrap();
//! assert_eq!(data.dataset.len(), 150);
//!
//! let manual = Dataset::new(vec![0.0, 1.0], vec![5.0, 7.5]).unwrap();
//! assert_eq!(manual.x(), &[0.0, 1.0]);
//! ```

use crate::error::{GdError, Result};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;

pub mod synthetic;
pub use self::synthetic::{linspace, SyntheticConfig, SyntheticData, TrueParams};

/// Ordered `(x_i, y_i)` samples, `len ≥ 1`, `x.len() == y.len()`.
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
    x: Vec<f64>,
    y: Vec<f64>,
}

/// One CSV row.
#[derive(Debug, Serialize, Deserialize)]
struct Sample {
    x: f64,
    y: f64,
}

impl Dataset {
    /// # Errors
    /// - [`GdError::InputShape`] if lengths differ (never truncates or pads)
    /// - [`GdError::EmptyDataset`] if there are no samples
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Result<Self> {
        if x.len() != y.len() {
            return Err(GdError::InputShape {
                x_len: x.len(),
                y_len: y.len(),
            });
        }
        if x.is_empty() {
            return Err(GdError::EmptyDataset);
        }
        Ok(Self { x, y })
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Writes `x,y` rows with a header.
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        for (&x, &y) in self.x.iter().zip(&self.y) {
            wtr.serialize(Sample { x, y })?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Reads `x,y` rows with a header.
    pub fn read_csv<R: io::Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::Reader::from_reader(reader);
        let mut x = Vec::new();
        let mut y = Vec::new();
        for record in rdr.deserialize() {
            let sample: Sample = record?;
            x.push(sample.x);
            y.push(sample.y);
        }
        Self::new(x, y)
    }

    pub fn save_csv(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        log::debug!("writing {} samples to {}", self.len(), path.display());
        self.write_csv(std::fs::File::create(path)?)
    }

    pub fn load_csv(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let dataset = Self::read_csv(std::fs::File::open(path)?)?;
        log::debug!("loaded {} samples from {}", dataset.len(), path.display());
        Ok(dataset)
    }
}
