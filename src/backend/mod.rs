//! # Backend Abstraction
//!
//! Vector arithmetic used by the optimizer, behind a trait so the training loop
//! does not care whether samples live in a plain `Vec<f64>` or an `ndarray`
//! array.
//!
//! ## Available Backends
//!
//! | Backend          | Feature   | Use Case                          |
//! |------------------|-----------|-----------------------------------|
//! | `CpuBackend`     | (always)  | Default, pure-Rust implementation |
//! | `NdarrayBackend` | `ndarray` | Interop with `ndarray` ecosystem  |
//!
//! ## Example
//!
//! ```rust
//! use linfit_gd::backend::{Backend, CpuBackend};
//!
//! let x = CpuBackend::from_slice(&[1.0, 2.0, 3.0]);
//! let y = CpuBackend::affine(&x, 1.0, 2.0);
//! assert_eq!(CpuBackend::to_vec(&y), vec![3.0, 5.0, 7.0]);
//! ```

pub mod cpu;
pub use cpu::CpuBackend;

#[cfg(feature = "ndarray")]
mod ndarray_backend;
#[cfg(feature = "ndarray")]
/// Backend backed by the `ndarray` crate for ecosystem interoperability.
pub use ndarray_backend::NdarrayBackend;

/// Abstraction over the one-dimensional vector operations needed by batch
/// gradient descent on a single feature.
///
/// Binary operations assume equal lengths; callers validate shapes before
/// handing vectors to a backend.
pub trait Backend: Clone + Copy + 'static {
    /// Owned vector of `f64` samples.
    type Vector: Clone + Send + Sync;

    fn from_slice(data: &[f64]) -> Self::Vector;
    fn to_vec(v: &Self::Vector) -> Vec<f64>;
    fn len(v: &Self::Vector) -> usize;

    /// Elementwise `intercept + slope * v`.
    fn affine(v: &Self::Vector, intercept: f64, slope: f64) -> Self::Vector;

    /// Elementwise `a - b`.
    fn sub(a: &Self::Vector, b: &Self::Vector) -> Self::Vector;

    fn sum(v: &Self::Vector) -> f64;

    /// `Σ a_i * b_i`.
    fn dot(a: &Self::Vector, b: &Self::Vector) -> f64;

    /// `Σ v_i²`.
    fn sum_squares(v: &Self::Vector) -> f64 {
        Self::dot(v, v)
    }
}
