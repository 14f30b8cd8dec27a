pub mod linear;
pub use linear::{LinearModel, LinearParams};

/// Arithmetic on a parameter set, treated as one vector.
///
/// Optimizers are written against this trait so an update touches every
/// parameter from the same gradient snapshot.
pub trait ParamOps: Clone {
    fn add(&self, other: &Self) -> Self;
    fn scale(&self, factor: f64) -> Self;
}
