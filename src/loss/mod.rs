use crate::backend::Backend;
use crate::model::LinearParams;

/// A differentiable cost over the residuals `errors = ŷ - y`.
///
/// `n_samples` is the training-set size fixed for the whole `fit` call; it is
/// passed in rather than read from the vectors.
pub trait Loss<B: Backend> {
    /// Scalar cost, recorded once per iteration.
    fn cost(&self, errors: &B::Vector, n_samples: usize) -> f64;

    /// Partial derivatives of the cost with respect to `(θ0, θ1)`, computed
    /// from residuals of the current parameters.
    fn gradients(&self, x: &B::Vector, errors: &B::Vector, n_samples: usize) -> LinearParams;
}

/// Mean squared error scaled by one half:
/// `J = (1/(2m)) * Σ(ŷ_i - y_i)²`.
///
/// Gradients:
/// - `∂J/∂θ0 = (1/m) * Σ e_i`
/// - `∂J/∂θ1 = (1/m) * Σ e_i * x_i`
///
/// No clamping is applied; a runaway learning rate shows up as an exploding
/// or non-finite cost.
#[derive(Clone, Copy, Debug, Default)]
pub struct HalfMse;

impl<B: Backend> Loss<B> for HalfMse {
    fn cost(&self, errors: &B::Vector, n_samples: usize) -> f64 {
        (1.0 / (2.0 * n_samples as f64)) * B::sum_squares(errors)
    }

    fn gradients(&self, x: &B::Vector, errors: &B::Vector, n_samples: usize) -> LinearParams {
        let inv_m = 1.0 / n_samples as f64;
        LinearParams {
            intercept: inv_m * B::sum(errors),
            slope: inv_m * B::dot(errors, x),
        }
    }
}
