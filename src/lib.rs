//! # linfit-gd
//!
//! One-feature linear regression, `h(x) = θ0 + θ1·x`, fitted with full-batch
//! gradient descent on the half mean squared error
//! `J(θ) = (1/2m) Σ (h(x_i) − y_i)²`.
//!
//! ## Core Design Principles
//!
//! - **Simultaneous updates**: both gradients come from one residual snapshot
//!   per iteration, then both parameters move together.
//! - **Observable training**: every iteration appends its cost to the history,
//!   so divergence shows up as data instead of a hidden failure.
//! - **Backend Agnosticism**: vector arithmetic goes through the [`Backend`]
//!   trait; the trainer is generic over it.
//!
//! ## Quick Start
//!
//! ```rust
//! use linfit_gd::{LinearRegressionGD, SyntheticConfig};
//!
//! let data = SyntheticConfig::default().generate().unwrap();
//! let mut model = LinearRegressionGD::default();
//! model.fit_dataset(&data.dataset).unwrap();
//!
//! assert_eq!(model.cost_history().len(), 2000);
//! println!("θ0 = {:.4}, θ1 = {:.4}", model.theta_0(), model.theta_1());
//! ```
//!
//! ## Module Structure
//!
//! - `backend` — vector primitives (`CpuBackend`, optional `NdarrayBackend`)
//! - `model` — the two-parameter linear hypothesis
//! - `loss` — half-MSE cost and its gradients
//! - `optimizer` — the gradient-descent update rule
//! - `trainer` — the iteration loop, stopping rules and cost history
//! - `dataset` — validated samples, CSV I/O and the synthetic generator
//! - `config` — JSON configuration with defaults
//! - `plot` — PNG rendering of the training samples
//! - `report` — run summaries
//! - `explain` — client for the remote explanation service

pub mod backend;

/// JSON configuration for training, data generation and the explainer.
pub mod config;

/// Training samples and the synthetic data generator.
pub mod dataset;

pub mod error;

/// Natural-language explanation of the algorithm from a remote API.
pub mod explain;

/// Cost function and gradients.
pub mod loss;

/// The linear hypothesis and its parameters.
pub mod model;

/// Parameter update rules.
pub mod optimizer;

/// PNG scatter plot of the samples and the generating line.
pub mod plot;

pub mod report;

/// Gradient-descent training loop.
pub mod trainer;

pub use backend::{Backend, CpuBackend};
pub use config::{AppConfig, TrainingConfig};
pub use dataset::{Dataset, SyntheticConfig, SyntheticData, TrueParams};
pub use error::{GdError, Result};
pub use model::LinearParams;
pub use report::TrainingReport;
pub use trainer::{FitOutcome, LinearRegressionGD, LinearRegressionGDBuilder, StopReason};
