//! Batch gradient-descent training loop for the one-feature linear model.
//!
//! [`LinearRegressionGD`] owns the learned parameters, the hyperparameters and
//! the cost history. `fit` is the only operation that mutates it.
//!
//! ```rust
//! use linfit_gd::trainer::LinearRegressionGD;
//!
//! let x: Vec<f64> = (0..50).map(|i| i as f64 / 5.0).collect();
//! let y: Vec<f64> = x.iter().map(|x| 2.5 * x + 5.0).collect();
//!
//! let mut model = LinearRegressionGD::builder()
//!     .learning_rate(0.02)
//!     .n_iterations(3000)
//!     .build()
//!     .unwrap();
//! model.fit(&x, &y).unwrap();
//!
//! assert_eq!(model.cost_history().len(), 3000);
//! assert!((model.theta_1() - 2.5).abs() < 0.01);
//! ```

use crate::backend::{Backend, CpuBackend};
use crate::config::{
    TrainingConfig, DEFAULT_LEARNING_RATE, DEFAULT_LOG_EVERY, DEFAULT_N_ITERATIONS,
};
use crate::dataset::Dataset;
use crate::error::{GdError, Result};
use crate::loss::{HalfMse, Loss};
use crate::model::{LinearModel, LinearParams};
use crate::optimizer::{GradientDescent, Optimizer};
use log::{debug, info, warn};

/// When the loop stops.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StoppingRule {
    /// Run exactly `n_iterations`, whatever the cost does.
    FixedIterations,
    /// Stop after the first iteration whose cost differs from the previous
    /// one by less than `tolerance`, or after `n_iterations`.
    Tolerance { tolerance: f64 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// The iteration budget was used up.
    Exhausted,
    /// The tolerance rule fired.
    Converged,
}

/// Summary of a single `fit` call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitOutcome {
    /// Iterations executed by this call (entries appended to the history).
    pub iterations: usize,
    /// Cost recorded by the last iteration of this call.
    pub final_cost: f64,
    pub stop_reason: StopReason,
}

/// Linear regression `h(x) = θ0 + θ1·x` trained with full-batch gradient
/// descent.
///
/// # History semantics
/// `fit` continues from the current parameters and **appends** to
/// [`cost_history`](Self::cost_history); it never resets either. Call
/// [`reset`](Self::reset) or build a fresh instance to retrain from scratch.
///
/// # Concurrency
/// Parameters and history form one unit of state. `fit` takes `&mut self`, so
/// sharing across threads needs external locking around the whole object.
#[derive(Clone, Debug)]
pub struct LinearRegressionGD<B: Backend = CpuBackend> {
    model: LinearModel<B>,
    loss_fn: HalfMse,
    optimizer: GradientDescent,
    n_iterations: usize,
    stopping: StoppingRule,
    check_divergence: bool,
    log_every: usize,
    cost_history: Vec<f64>,
}

impl Default for LinearRegressionGD<CpuBackend> {
    /// `learning_rate = 0.02`, `n_iterations = 2000`.
    fn default() -> Self {
        LinearRegressionGDBuilder::new().build_unchecked()
    }
}

impl LinearRegressionGD<CpuBackend> {
    /// Creates a regressor with the given step size and iteration budget and
    /// default settings otherwise.
    pub fn new(learning_rate: f64, n_iterations: usize) -> Result<Self> {
        Self::builder()
            .learning_rate(learning_rate)
            .n_iterations(n_iterations)
            .build()
    }

    pub fn from_config(config: &TrainingConfig) -> Result<Self> {
        LinearRegressionGDBuilder::from_config(config).build()
    }

    /// Builder on the default backend. For another backend use
    /// `LinearRegressionGDBuilder::<B>::new()`.
    pub fn builder() -> LinearRegressionGDBuilder<CpuBackend> {
        LinearRegressionGDBuilder::new()
    }
}

impl<B: Backend> LinearRegressionGD<B> {
    /// Elementwise `θ0 + θ1·x_i` with the current parameters.
    ///
    /// Empty input gives empty output.
    pub fn predict(&self, x: &[f64]) -> Vec<f64> {
        let x = B::from_slice(x);
        B::to_vec(&self.model.forward(&x))
    }

    /// Trains on `(x, y)`.
    ///
    /// Each iteration, over the full training set:
    /// 1. predict with the current `θ0, θ1`;
    /// 2. compute residuals and the cost, appending it to the history;
    /// 3. compute both gradients from those residuals;
    /// 4. update both parameters from that single gradient snapshot.
    ///
    /// With the default [`StoppingRule::FixedIterations`] exactly
    /// `n_iterations` iterations run. A divergent learning rate is not an
    /// error unless the divergence check is enabled; it shows up as a
    /// growing or non-finite cost in the history.
    ///
    /// # Errors
    /// - [`GdError::InputShape`] if `x` and `y` differ in length
    /// - [`GdError::EmptyDataset`] if there are no samples
    /// - [`GdError::Divergence`] only when the divergence check is enabled
    ///
    /// Shape errors are raised before any state is touched.
    pub fn fit(&mut self, x: &[f64], y: &[f64]) -> Result<FitOutcome> {
        if x.len() != y.len() {
            return Err(GdError::InputShape {
                x_len: x.len(),
                y_len: y.len(),
            });
        }
        if x.is_empty() {
            return Err(GdError::EmptyDataset);
        }

        let n_samples = x.len();
        let x = B::from_slice(x);
        let y = B::from_slice(y);
        debug!(
            "starting fit: m = {}, learning_rate = {}, n_iterations = {}, stopping = {:?}",
            n_samples,
            self.optimizer.learning_rate(),
            self.n_iterations,
            self.stopping
        );
        self.cost_history.reserve(self.n_iterations);

        let mut previous_cost: Option<f64> = None;
        let mut outcome = FitOutcome {
            iterations: 0,
            final_cost: f64::NAN,
            stop_reason: StopReason::Exhausted,
        };

        for iteration in 0..self.n_iterations {
            let predictions = self.model.forward(&x);
            let errors = B::sub(&predictions, &y);

            let cost = Loss::<B>::cost(&self.loss_fn, &errors, n_samples);
            self.cost_history.push(cost);
            outcome.iterations = iteration + 1;
            outcome.final_cost = cost;

            if self.check_divergence && !cost.is_finite() {
                warn!("cost became {} at iteration {}", cost, iteration);
                return Err(GdError::Divergence { iteration, cost });
            }

            let grads = Loss::<B>::gradients(&self.loss_fn, &x, &errors, n_samples);
            let new_params = self.optimizer.step(self.model.params(), &grads);
            self.model.update_params(new_params);

            if self.log_every > 0 && iteration % self.log_every == 0 {
                info!(
                    "Iteration {}: Cost={:.4}, θ₀={:.4}, θ₁={:.4}",
                    iteration,
                    cost,
                    self.theta_0(),
                    self.theta_1()
                );
            }

            if let StoppingRule::Tolerance { tolerance } = self.stopping {
                if let Some(prev) = previous_cost {
                    if (prev - cost).abs() < tolerance {
                        outcome.stop_reason = StopReason::Converged;
                        debug!(
                            "tolerance {} reached after {} iterations",
                            tolerance,
                            iteration + 1
                        );
                        break;
                    }
                }
            }
            previous_cost = Some(cost);
        }

        info!(
            "Final: θ₀ = {:.4}, θ₁ = {:.4}",
            self.theta_0(),
            self.theta_1()
        );
        Ok(outcome)
    }

    /// Same as [`fit`](Self::fit) on an already validated dataset.
    pub fn fit_dataset(&mut self, dataset: &Dataset) -> Result<FitOutcome> {
        self.fit(dataset.x(), dataset.y())
    }

    /// Restores `θ0 = θ1 = 0` and clears the cost history. Hyperparameters are
    /// kept.
    pub fn reset(&mut self) {
        self.model = LinearModel::new();
        self.cost_history.clear();
    }

    /// Intercept θ0.
    pub fn theta_0(&self) -> f64 {
        self.model.params().intercept
    }

    /// Slope θ1.
    pub fn theta_1(&self) -> f64 {
        self.model.params().slope
    }

    pub fn params(&self) -> LinearParams {
        *self.model.params()
    }

    /// One cost per executed iteration, across all `fit` calls since
    /// construction or the last [`reset`](Self::reset).
    pub fn cost_history(&self) -> &[f64] {
        &self.cost_history
    }

    pub fn learning_rate(&self) -> f64 {
        self.optimizer.learning_rate()
    }

    pub fn n_iterations(&self) -> usize {
        self.n_iterations
    }

    pub fn stopping_rule(&self) -> StoppingRule {
        self.stopping
    }
}

/// Fluent builder for [`LinearRegressionGD`].
///
/// Defaults:
/// - `learning_rate`: 0.02
/// - `n_iterations`: 2000
/// - `log_every`: 200
/// - stopping: fixed iteration count
/// - divergence check: off
#[derive(Clone, Debug)]
pub struct LinearRegressionGDBuilder<B: Backend = CpuBackend> {
    learning_rate: f64,
    n_iterations: usize,
    log_every: usize,
    tolerance: Option<f64>,
    check_divergence: bool,
    _backend: std::marker::PhantomData<B>,
}

impl<B: Backend> Default for LinearRegressionGDBuilder<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Backend> LinearRegressionGDBuilder<B> {
    pub fn new() -> Self {
        Self {
            learning_rate: DEFAULT_LEARNING_RATE,
            n_iterations: DEFAULT_N_ITERATIONS,
            log_every: DEFAULT_LOG_EVERY,
            tolerance: None,
            check_divergence: false,
            _backend: std::marker::PhantomData,
        }
    }

    /// Starts from the values in `config`.
    pub fn from_config(config: &TrainingConfig) -> Self {
        let builder = Self::new()
            .learning_rate(config.learning_rate)
            .n_iterations(config.n_iterations)
            .log_every(config.log_every)
            .check_divergence(config.check_divergence);
        match config.tolerance {
            Some(tol) => builder.tolerance(tol),
            None => builder,
        }
    }

    pub fn learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn n_iterations(mut self, n_iterations: usize) -> Self {
        self.n_iterations = n_iterations;
        self
    }

    /// Log progress every `every` iterations; `0` silences progress records.
    pub fn log_every(mut self, every: usize) -> Self {
        self.log_every = every;
        self
    }

    /// Switches to [`StoppingRule::Tolerance`]. This makes the history length
    /// data-dependent.
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = Some(tolerance);
        self
    }

    /// Fail `fit` with [`GdError::Divergence`] on the first non-finite cost.
    pub fn check_divergence(mut self, enabled: bool) -> Self {
        self.check_divergence = enabled;
        self
    }

    /// Validates the hyperparameters and builds the regressor.
    ///
    /// # Errors
    /// [`GdError::InvalidHyperparameter`] if the learning rate is not a
    /// positive finite number, `n_iterations` is zero, or the tolerance is not
    /// a positive finite number.
    pub fn build(self) -> Result<LinearRegressionGD<B>> {
        TrainingConfig {
            learning_rate: self.learning_rate,
            n_iterations: self.n_iterations,
            log_every: self.log_every,
            tolerance: self.tolerance,
            check_divergence: self.check_divergence,
        }
        .validate()?;
        Ok(self.build_unchecked())
    }

    fn build_unchecked(self) -> LinearRegressionGD<B> {
        let stopping = match self.tolerance {
            Some(tolerance) => StoppingRule::Tolerance { tolerance },
            None => StoppingRule::FixedIterations,
        };
        LinearRegressionGD {
            model: LinearModel::new(),
            loss_fn: HalfMse,
            optimizer: GradientDescent::new(self.learning_rate),
            n_iterations: self.n_iterations,
            stopping,
            check_divergence: self.check_divergence,
            log_every: self.log_every,
            cost_history: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(n: usize, slope: f64, intercept: f64) -> (Vec<f64>, Vec<f64>) {
        let x: Vec<f64> = (0..n).map(|i| i as f64 / n as f64 * 4.0).collect();
        let y = x.iter().map(|x| slope * x + intercept).collect();
        (x, y)
    }

    #[test]
    fn test_default_hyperparameters() {
        let model = LinearRegressionGD::default();
        assert_eq!(model.learning_rate(), 0.02);
        assert_eq!(model.n_iterations(), 2000);
        assert_eq!(model.stopping_rule(), StoppingRule::FixedIterations);
        assert_eq!(model.theta_0(), 0.0);
        assert_eq!(model.theta_1(), 0.0);
        assert!(model.cost_history().is_empty());
    }

    #[test]
    fn test_builder_rejects_invalid_hyperparameters() {
        assert!(LinearRegressionGD::new(0.0, 10).is_err());
        assert!(LinearRegressionGD::new(-1.0, 10).is_err());
        assert!(LinearRegressionGD::new(0.1, 0).is_err());
        assert!(LinearRegressionGD::builder()
            .tolerance(0.0)
            .build()
            .is_err());
    }

    #[test]
    fn test_predict_before_fit_is_zero() {
        let model = LinearRegressionGD::default();
        assert_eq!(model.predict(&[1.0, -2.0, 1e6]), vec![0.0, 0.0, 0.0]);
        assert!(model.predict(&[]).is_empty());
    }

    #[test]
    fn test_fit_rejects_shape_mismatch_without_touching_state() {
        let mut model = LinearRegressionGD::default();
        let err = model.fit(&[1.0, 2.0, 3.0], &[1.0, 2.0]).unwrap_err();
        assert!(matches!(err, GdError::InputShape { x_len: 3, y_len: 2 }));
        assert!(model.cost_history().is_empty());
        assert_eq!(model.params(), LinearParams::default());
    }

    #[test]
    fn test_fit_rejects_empty() {
        let mut model = LinearRegressionGD::default();
        assert!(matches!(model.fit(&[], &[]), Err(GdError::EmptyDataset)));
        assert!(model.cost_history().is_empty());
    }

    #[test]
    fn test_single_iteration_matches_hand_computation() {
        // x = [1, 2], y = [3, 5]; from θ = (0, 0):
        // e = [-3, -5], J = (9 + 25) / 4 = 8.5
        // g0 = -4, g1 = (-3 - 10) / 2 = -6.5
        // θ0 = 0.1 * 4 = 0.4, θ1 = 0.1 * 6.5 = 0.65
        let mut model = LinearRegressionGD::new(0.1, 1).unwrap();
        let outcome = model.fit(&[1.0, 2.0], &[3.0, 5.0]).unwrap();

        assert_eq!(outcome.iterations, 1);
        assert_eq!(outcome.stop_reason, StopReason::Exhausted);
        assert_eq!(model.cost_history(), &[8.5]);
        assert!((model.theta_0() - 0.4).abs() < 1e-12);
        assert!((model.theta_1() - 0.65).abs() < 1e-12);
    }

    #[test]
    fn test_update_is_simultaneous() {
        // If θ0 were updated first and reused for θ1's gradient, the second
        // iteration would differ from this reference computed from one
        // residual snapshot per step.
        let x = [1.0, 2.0, 3.0];
        let y = [2.0, 4.5, 5.5];
        let alpha = 0.05;

        let (mut t0, mut t1) = (0.0f64, 0.0f64);
        for _ in 0..2 {
            let e: Vec<f64> = x.iter().zip(&y).map(|(x, y)| t0 + t1 * x - y).collect();
            let g0 = (1.0 / 3.0) * e.iter().sum::<f64>();
            let g1 = (1.0 / 3.0) * e.iter().zip(&x).map(|(e, x)| e * x).sum::<f64>();
            t0 -= alpha * g0;
            t1 -= alpha * g1;
        }

        let mut model = LinearRegressionGD::new(alpha, 2).unwrap();
        model.fit(&x, &y).unwrap();
        assert_eq!(model.theta_0(), t0);
        assert_eq!(model.theta_1(), t1);
    }

    #[test]
    fn test_repeated_fit_appends_history_and_continues() {
        let (x, y) = line(20, 2.0, 1.0);
        let mut model = LinearRegressionGD::new(0.05, 100).unwrap();

        model.fit(&x, &y).unwrap();
        let after_first = model.params();
        let last_first = *model.cost_history().last().unwrap();

        model.fit(&x, &y).unwrap();
        assert_eq!(model.cost_history().len(), 200);
        // the second call starts from the learned parameters
        assert!(model.cost_history()[100] <= last_first);
        assert_ne!(model.params(), after_first);
    }

    #[test]
    fn test_reset_restores_fresh_state() {
        let (x, y) = line(10, 1.0, 0.0);
        let mut model = LinearRegressionGD::new(0.05, 10).unwrap();
        model.fit(&x, &y).unwrap();
        model.reset();
        assert!(model.cost_history().is_empty());
        assert_eq!(model.params(), LinearParams::default());
        assert_eq!(model.learning_rate(), 0.05);

        let mut fresh = LinearRegressionGD::new(0.05, 10).unwrap();
        model.fit(&x, &y).unwrap();
        fresh.fit(&x, &y).unwrap();
        assert_eq!(model.cost_history(), fresh.cost_history());
    }

    #[test]
    fn test_tolerance_stops_early() {
        let (x, y) = line(30, 2.0, 1.0);
        let mut model = LinearRegressionGD::builder()
            .learning_rate(0.1)
            .n_iterations(100_000)
            .tolerance(1e-12)
            .log_every(0)
            .build()
            .unwrap();

        let outcome = model.fit(&x, &y).unwrap();
        assert_eq!(outcome.stop_reason, StopReason::Converged);
        assert!(outcome.iterations < 100_000);
        assert_eq!(model.cost_history().len(), outcome.iterations);
        let h = model.cost_history();
        assert!((h[h.len() - 2] - h[h.len() - 1]).abs() < 1e-12);
    }

    #[test]
    fn test_tolerance_respects_budget() {
        let (x, y) = line(30, 2.0, 1.0);
        let mut model = LinearRegressionGD::builder()
            .learning_rate(0.001)
            .n_iterations(5)
            .tolerance(1e-15)
            .build()
            .unwrap();
        let outcome = model.fit(&x, &y).unwrap();
        assert_eq!(outcome.stop_reason, StopReason::Exhausted);
        assert_eq!(outcome.iterations, 5);
    }

    #[test]
    fn test_divergence_surfaces_in_history_by_default() {
        let (x, y) = line(30, 2.0, 1.0);
        let mut model = LinearRegressionGD::new(50.0, 400).unwrap();
        let outcome = model.fit(&x, &y).unwrap();
        assert_eq!(outcome.iterations, 400);
        assert!(!model.cost_history().last().unwrap().is_finite());
    }

    #[test]
    fn test_divergence_check_fails_fast() {
        let (x, y) = line(30, 2.0, 1.0);
        let mut model = LinearRegressionGD::builder()
            .learning_rate(50.0)
            .n_iterations(400)
            .check_divergence(true)
            .build()
            .unwrap();

        match model.fit(&x, &y) {
            Err(GdError::Divergence { iteration, cost }) => {
                assert!(!cost.is_finite());
                assert_eq!(model.cost_history().len(), iteration + 1);
                assert!(iteration < 400);
            }
            other => panic!("expected divergence, got {:?}", other),
        }
    }

    #[test]
    fn test_fit_dataset() {
        let (x, y) = line(15, -1.0, 3.0);
        let dataset = Dataset::new(x, y).unwrap();
        let mut model = LinearRegressionGD::new(0.05, 50).unwrap();
        let outcome = model.fit_dataset(&dataset).unwrap();
        assert_eq!(outcome.iterations, 50);
        assert_eq!(outcome.final_cost, *model.cost_history().last().unwrap());
    }

    #[test]
    fn test_from_config() {
        let config = TrainingConfig {
            learning_rate: 0.01,
            n_iterations: 7,
            log_every: 0,
            tolerance: Some(1e-6),
            check_divergence: true,
        };
        let model = LinearRegressionGD::from_config(&config).unwrap();
        assert_eq!(model.learning_rate(), 0.01);
        assert_eq!(model.n_iterations(), 7);
        assert_eq!(
            model.stopping_rule(),
            StoppingRule::Tolerance { tolerance: 1e-6 }
        );
    }
}
