use crate::model::ParamOps;

/// Trait for gradient-based optimizers.
///
/// `step` is functional: it reads the current parameters and one gradient
/// snapshot and returns the next parameters. Nothing is updated in place, so
/// every parameter moves based on residuals from the same iteration.
pub trait Optimizer<P> {
    /// ```text
    /// params_new = params - learning_rate * gradients
    /// ```
    fn step(&self, params: &P, gradients: &P) -> P;
}

/// Plain gradient descent: `θ ← θ - α · ∇J(θ)`.
///
/// Stateless. Full-batch or not is decided by the caller, which here is
/// always the whole training set.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientDescent {
    learning_rate: f64,
}

impl GradientDescent {
    /// Creates an optimizer with step size `learning_rate` (α).
    ///
    /// Range checks happen when the regressor is built, see
    /// [`LinearRegressionGDBuilder::build`](crate::trainer::LinearRegressionGDBuilder::build).
    pub fn new(learning_rate: f64) -> Self {
        Self { learning_rate }
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }
}

impl<P: ParamOps> Optimizer<P> for GradientDescent {
    fn step(&self, params: &P, gradients: &P) -> P {
        // θ + (-α)·g is bitwise equal to θ - α·g
        params.add(&gradients.scale(-self.learning_rate))
    }
}
