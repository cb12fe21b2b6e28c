//! Reduced Rank Extrapolation

use nalgebra::{DMatrix, DVector};
use tracing::{debug, trace};

use crate::config::ExtrapolationConfig;
use crate::delta::{check_finite_differences, compute_delta};
use crate::error::{ExtrapolationError, Result};
use crate::gemv::gemv;
use crate::lstsq::solve_least_squares_in_place;

/// Perform reduced rank extrapolation with the default configuration
///
/// Removes geometric components from the sequence whose terms are the
/// columns of `sequence`, leaving its limit. Divergent geometric components
/// are removed too, so the result is an antilimit for divergent input.
///
/// # Example
/// ```
/// use extrapolatr_rust::{DMatrix, rre};
///
/// let vals = [1.0, 0.5, 0.25, 0.125, 0.0625];
/// let sequence = DMatrix::from_row_slice(1, 5, &vals);
/// let limit = rre(&sequence).unwrap();
/// assert!(limit[0].abs() < 1e-9);
/// ```
pub fn rre(sequence: &DMatrix<f64>) -> Result<DVector<f64>> {
    rre_with_config(sequence, &ExtrapolationConfig::default())
}

/// Perform reduced rank extrapolation
///
/// Solves `ddelta * c ≈ delta[:, 0]` in the minimum-norm least-squares
/// sense and returns `sequence[:, 0] - delta[:, 0..k-2] * c`.
///
/// # Errors
/// * `InsufficientColumns` if the sequence has fewer than 3 columns
/// * `SolverFailure` if the least-squares solve fails
/// * `InvalidTolerance` if `config` is not valid
pub fn rre_with_config(
    sequence: &DMatrix<f64>,
    config: &ExtrapolationConfig,
) -> Result<DVector<f64>> {
    let (m, k) = sequence.shape();
    if k <= 2 {
        return Err(ExtrapolationError::InsufficientColumns { ncols: k });
    }
    config.validate()?;
    trace!(nrows = m, ncols = k, "rre");

    let delta = compute_delta(sequence);
    check_finite_differences(&delta)?;
    let ddelta = compute_delta(&delta);
    check_finite_differences(&ddelta)?;
    let n = k - 2;

    // Underdetermined systems write n > m solution entries
    let mut coeffs = vec![0.0; m.max(n)];
    for (dst, &src) in coeffs.iter_mut().zip(delta.column(0).iter()) {
        *dst = src;
    }

    let rtol = config.rank_rtol_for(m, n);
    let rank = solve_least_squares_in_place(&ddelta, &mut coeffs, rtol)?;
    debug!(rank = rank, ncoeffs = n, "rre coefficients solved");

    // result = sequence[:, 0] - delta[:, 0..n] * c
    let mut result = sequence.column(0).into_owned();
    gemv(
        m,
        n,
        -1.0,
        &delta.as_slice()[..m * n],
        &coeffs[..n],
        1.0,
        result.as_mut_slice(),
    );

    Ok(result)
}
