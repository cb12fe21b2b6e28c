//! Common test utilities
#![allow(dead_code)]

use extrapolatr_rust::{DMatrix, DVector};

/// Simple deterministic pseudo-random number generator (LCG)
///
/// Uses the common parameters: a = 1664525, c = 1013904223 (from Numerical Recipes)
pub struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Generate next f64 in range [0, 1)
    pub fn next_f64(&mut self) -> f64 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        // Map to [0, 1) using upper 48 bits
        ((self.state >> 16) as f64) / ((1u64 << 48) as f64)
    }

    /// Generate next f64 in range [lo, hi)
    pub fn next_range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    /// Generate next usize in range [lo, hi)
    pub fn next_usize(&mut self, lo: usize, hi: usize) -> usize {
        lo + ((hi - lo) as f64 * self.next_f64()) as usize % (hi - lo)
    }

    pub fn vector(&mut self, len: usize, lo: f64, hi: f64) -> DVector<f64> {
        DVector::from_fn(len, |_, _| self.next_range(lo, hi))
    }
}

/// Sequence x_i = limit + sum_l ratio_l^i * direction_l for i = 0..nterms
pub fn geometric_sequence(
    limit: &DVector<f64>,
    components: &[(f64, DVector<f64>)],
    nterms: usize,
) -> DMatrix<f64> {
    DMatrix::from_fn(limit.len(), nterms, |i, j| {
        limit[i]
            + components
                .iter()
                .map(|(ratio, direction)| ratio.powi(j as i32) * direction[i])
                .sum::<f64>()
    })
}

/// Largest absolute componentwise difference
pub fn max_abs_diff(a: &DVector<f64>, b: &DVector<f64>) -> f64 {
    assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max)
}
