use super::Backend;
use ndarray::Array1;

/// Backend over `ndarray::Array1<f64>`.
///
/// `ndarray` reductions may reorder additions, so results can differ from
/// [`CpuBackend`](super::CpuBackend) in the last bits.
#[derive(Clone, Debug, Copy, Default)]
pub struct NdarrayBackend;

impl Backend for NdarrayBackend {
    type Vector = Array1<f64>;

    fn from_slice(data: &[f64]) -> Self::Vector {
        Array1::from(data.to_vec())
    }

    fn to_vec(v: &Self::Vector) -> Vec<f64> {
        v.to_vec()
    }

    fn len(v: &Self::Vector) -> usize {
        v.len()
    }

    fn affine(v: &Self::Vector, intercept: f64, slope: f64) -> Self::Vector {
        v.mapv(|x| intercept + slope * x)
    }

    fn sub(a: &Self::Vector, b: &Self::Vector) -> Self::Vector {
        a - b
    }

    fn sum(v: &Self::Vector) -> f64 {
        v.sum()
    }

    fn dot(a: &Self::Vector, b: &Self::Vector) -> f64 {
        a.dot(b)
    }
}
