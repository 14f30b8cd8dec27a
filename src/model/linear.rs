use super::ParamOps;
use crate::backend::{Backend, CpuBackend};
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

/// Learned quantities of the hypothesis `h(x) = θ0 + θ1·x`.
///
/// Also used to carry gradients, which have the same shape.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LinearParams {
    /// θ0
    pub intercept: f64,
    /// θ1
    pub slope: f64,
}

impl LinearParams {
    pub fn new(intercept: f64, slope: f64) -> Self {
        Self { intercept, slope }
    }
}

impl ParamOps for LinearParams {
    fn add(&self, other: &Self) -> Self {
        Self {
            intercept: self.intercept + other.intercept,
            slope: self.slope + other.slope,
        }
    }

    fn scale(&self, factor: f64) -> Self {
        Self {
            intercept: self.intercept * factor,
            slope: self.slope * factor,
        }
    }
}

/// One-feature linear model evaluated on backend `B`.
#[derive(Clone, Debug)]
pub struct LinearModel<B: Backend = CpuBackend> {
    params: LinearParams,
    _backend: PhantomData<B>,
}

impl<B: Backend> Default for LinearModel<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Backend> LinearModel<B> {
    /// Creates a model with `θ0 = θ1 = 0`.
    pub fn new() -> Self {
        Self::from_params(LinearParams::default())
    }

    pub fn from_params(params: LinearParams) -> Self {
        Self {
            params,
            _backend: PhantomData,
        }
    }

    /// Predictions `θ0 + θ1·x_i` using the parameters as they are now.
    pub fn forward(&self, x: &B::Vector) -> B::Vector {
        B::affine(x, self.params.intercept, self.params.slope)
    }

    pub fn params(&self) -> &LinearParams {
        &self.params
    }

    pub fn update_params(&mut self, params: LinearParams) {
        self.params = params;
    }
}
