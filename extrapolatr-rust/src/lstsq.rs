//! Rank-deficient linear least squares via SVD
//!
//! Solves `min ||A x - b||_2` for a real m×n matrix `A` of any shape and
//! rank, returning the minimum-norm minimizer. Singular values at or below
//! `rtol * sigma_max` are treated as zero, which gives the pseudo-inverse
//! solution `x = V_r * S_r^{-1} * U_r^T * b` over the retained rank `r`.

use faer::Mat;
use nalgebra::{DMatrix, DVector};
use tracing::debug;

use crate::error::{ExtrapolationError, Result};

/// Minimum-norm least-squares solution
#[derive(Debug, Clone, PartialEq)]
pub struct LeastSquaresSolution {
    /// Solution vector (length n)
    pub solution: Vec<f64>,
    /// Effective numerical rank of `A`
    pub rank: usize,
}

/// Solve `A x ≈ b` and return the minimum-norm solution together with the
/// effective rank of `A`
///
/// # Arguments
/// * `a` - Coefficient matrix (m × n), any m and n
/// * `b` - Right-hand side (length m)
/// * `rtol` - Relative singular value cutoff
pub fn solve_least_squares(
    a: &DMatrix<f64>,
    b: &[f64],
    rtol: f64,
) -> Result<LeastSquaresSolution> {
    let (m, n) = a.shape();
    if b.len() != m {
        return Err(ExtrapolationError::SolverFailure(format!(
            "right-hand side has length {}, expected {}",
            b.len(),
            m
        )));
    }

    let mut rhs = vec![0.0; m.max(n)];
    rhs[..m].copy_from_slice(b);
    let rank = solve_least_squares_in_place(a, &mut rhs, rtol)?;
    rhs.truncate(n);

    Ok(LeastSquaresSolution {
        solution: rhs,
        rank,
    })
}

/// Buffer-based variant of [`solve_least_squares`]
///
/// `rhs` must hold at least `max(m, n)` entries. Its first `m` entries are
/// read as `b`; on success its first `n` entries are overwritten with the
/// solution and the effective rank is returned. Entries past `max(m, n)`
/// are never touched, so callers may reserve trailing slots. On failure
/// `rhs` is left unchanged.
pub fn solve_least_squares_in_place(
    a: &DMatrix<f64>,
    rhs: &mut [f64],
    rtol: f64,
) -> Result<usize> {
    let (m, n) = a.shape();
    if m == 0 || n == 0 {
        return Err(ExtrapolationError::SolverFailure(format!(
            "coefficient matrix must be non-empty, got {}x{}",
            m, n
        )));
    }
    if rhs.len() < m.max(n) {
        return Err(ExtrapolationError::SolverFailure(format!(
            "right-hand side buffer has length {}, needs at least {}",
            rhs.len(),
            m.max(n)
        )));
    }
    if !(rtol > 0.0 && rtol < 1.0) {
        return Err(ExtrapolationError::SolverFailure(format!(
            "rank tolerance must be in (0, 1), got {:?}",
            rtol
        )));
    }
    if a.iter().chain(rhs[..m].iter()).any(|x| !x.is_finite()) {
        return Err(ExtrapolationError::SolverFailure(
            "non-finite entry in coefficient matrix or right-hand side".to_string(),
        ));
    }

    let b = DVector::from_column_slice(&rhs[..m]);
    let (x, rank) = svd_min_norm_solve(a, &b, rtol)?;

    debug!(nrows = m, ncols = n, rank = rank, "least-squares solve completed");

    rhs[..n].copy_from_slice(x.as_slice());
    Ok(rank)
}

/// Pseudo-inverse solve using a thin SVD of `a`
fn svd_min_norm_solve(
    a: &DMatrix<f64>,
    b: &DVector<f64>,
    rtol: f64,
) -> Result<(DVector<f64>, usize)> {
    let (m, n) = a.shape();

    let a_faer = Mat::<f64>::from_fn(m, n, |i, j| a[(i, j)]);
    let svd = a_faer
        .thin_svd()
        .map_err(|e| ExtrapolationError::SolverFailure(format!("SVD failed: {:?}", e)))?;

    let u = svd.U();
    let v = svd.V();
    let s = svd.S().column_vector();
    let singular_values: Vec<f64> = (0..s.nrows()).map(|i| s[i]).collect();

    let cutoff = rank_cutoff(&singular_values, rtol);

    let mut x = DVector::<f64>::zeros(n);
    let mut rank = 0;
    for (i, &sigma) in singular_values.iter().enumerate() {
        if sigma <= cutoff {
            continue;
        }
        rank += 1;
        let coeff = (0..m).map(|r| u[(r, i)] * b[r]).sum::<f64>() / sigma;
        for (j, xj) in x.iter_mut().enumerate() {
            *xj += coeff * v[(j, i)];
        }
    }

    if x.iter().any(|xj| !xj.is_finite()) {
        return Err(ExtrapolationError::SolverFailure(
            "SVD produced a non-finite solution".to_string(),
        ));
    }

    Ok((x, rank))
}

/// Absolute singular value threshold: `rtol * sigma_max`
fn rank_cutoff(singular_values: &[f64], rtol: f64) -> f64 {
    let max_sv = singular_values.iter().fold(0.0_f64, |acc, &s| acc.max(s));
    max_sv * rtol
}

#[cfg(test)]
#[path = "lstsq_tests.rs"]
mod lstsq_tests;
