//! First-difference operator over the columns of a sequence matrix

use nalgebra::DMatrix;

use crate::error::{ExtrapolationError, Result};

/// Column-wise first difference
///
/// For an m×k input returns the m×(k-1) matrix whose column `j` is
/// `matrix[:, j+1] - matrix[:, j]`. A single-column input yields a
/// zero-width result.
pub fn compute_delta(matrix: &DMatrix<f64>) -> DMatrix<f64> {
    let (nrows, ncols) = matrix.shape();
    DMatrix::from_fn(nrows, ncols.saturating_sub(1), |i, j| {
        matrix[(i, j + 1)] - matrix[(i, j)]
    })
}

/// Reject differences that overflowed or carry NaN from the sequence
pub(crate) fn check_finite_differences(delta: &DMatrix<f64>) -> Result<()> {
    if delta.iter().any(|x| !x.is_finite()) {
        return Err(ExtrapolationError::SolverFailure(
            "non-finite values in sequence differences".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
#[path = "delta_tests.rs"]
mod delta_tests;
