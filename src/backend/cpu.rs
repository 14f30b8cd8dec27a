use super::Backend;

/// Pure-Rust backend over `Vec<f64>`.
///
/// Reductions sum strictly left to right, so results are reproducible
/// bit-for-bit for a given input order.
#[derive(Clone, Debug, Copy, Default)]
pub struct CpuBackend;

impl Backend for CpuBackend {
    type Vector = Vec<f64>;

    fn from_slice(data: &[f64]) -> Self::Vector {
        data.to_vec()
    }

    fn to_vec(v: &Self::Vector) -> Vec<f64> {
        v.clone()
    }

    fn len(v: &Self::Vector) -> usize {
        v.len()
    }

    fn affine(v: &Self::Vector, intercept: f64, slope: f64) -> Self::Vector {
        v.iter().map(|x| intercept + slope * x).collect()
    }

    fn sub(a: &Self::Vector, b: &Self::Vector) -> Self::Vector {
        a.iter().zip(b.iter()).map(|(a, b)| a - b).collect()
    }

    fn sum(v: &Self::Vector) -> f64 {
        v.iter().sum::<f64>()
    }

    fn dot(a: &Self::Vector, b: &Self::Vector) -> f64 {
        a.iter().zip(b.iter()).map(|(a, b)| a * b).sum::<f64>()
    }
}
