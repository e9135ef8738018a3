use nalgebra::{DMatrix, DVector};

/// Singular values below this (relative) are treated as zero.
const SVD_EPS: f64 = 1e-12;

/// A least-squares polynomial, stored against a centred and scaled abscissa
/// so Vandermonde matrices stay well conditioned for long series.
#[derive(Debug, Clone)]
pub struct Polynomial {
    /// Ascending powers of `(x - center) / scale`.
    coeffs: Vec<f64>,
    center: f64,
    scale: f64,
}

impl Polynomial {
    /// Fit a polynomial of degree `order`. Returns `None` when there are not
    /// more points than the degree or the lengths differ.
    pub fn fit(x: &[f64], y: &[f64], order: usize) -> Option<Self> {
        let n = x.len();
        if n != y.len() || n <= order {
            return None;
        }

        let (lo, hi) = x
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        let center = (lo + hi) / 2.0;
        let half_range = (hi - lo) / 2.0;
        let scale = if half_range > 0.0 { half_range } else { 1.0 };

        let vander = DMatrix::from_fn(n, order + 1, |i, j| {
            ((x[i] - center) / scale).powi(j as i32)
        });
        let rhs = DVector::from_column_slice(y);
        let coeffs = vander.svd(true, true).solve(&rhs, SVD_EPS).ok()?;

        Some(Self {
            coeffs: coeffs.iter().copied().collect(),
            center,
            scale,
        })
    }

    pub fn eval(&self, x: f64) -> f64 {
        let t = (x - self.center) / self.scale;
        self.coeffs.iter().rev().fold(0.0, |acc, &c| acc * t + c)
    }
}
