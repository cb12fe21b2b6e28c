//! Minimal Polynomial Extrapolation

use nalgebra::{DMatrix, DVector};
use tracing::{debug, trace};

use crate::config::ExtrapolationConfig;
use crate::delta::{check_finite_differences, compute_delta};
use crate::error::{ExtrapolationError, Result};
use crate::gemv::gemv;
use crate::lstsq::solve_least_squares_in_place;

/// Perform minimal polynomial extrapolation with the default configuration
///
/// Like [`rre`](fn@crate::rre), divergent geometric components are removed as
/// well as convergent ones.
///
/// # Example
/// ```
/// use extrapolatr_rust::{DMatrix, mpe};
///
/// let vals = [1.0, 0.5, 0.25, 0.125, 0.0625];
/// let mut data = vals.to_vec();
/// data.extend(vals.iter().map(|v| 2.0 + v));
/// let sequence = DMatrix::from_row_slice(2, 5, &data);
///
/// let limit = mpe(&sequence).unwrap();
/// assert!(limit[0].abs() < 1e-9);
/// assert!((limit[1] - 2.0).abs() < 1e-9);
/// ```
pub fn mpe(sequence: &DMatrix<f64>) -> Result<DVector<f64>> {
    mpe_with_config(sequence, &ExtrapolationConfig::default())
}

/// Perform minimal polynomial extrapolation
///
/// Fits the last difference column as a combination of the preceding ones,
/// extends the coefficients with a trailing `-1`, normalizes them to sum to
/// one and applies them to the first `k-1` terms of the sequence.
///
/// # Errors
/// * `InsufficientColumns` if the sequence has fewer than 3 columns
/// * `SolverFailure` if the least-squares solve fails
/// * `DegenerateNormalization` if the extended coefficients sum to ~0
/// * `InvalidTolerance` if `config` is not valid
pub fn mpe_with_config(
    sequence: &DMatrix<f64>,
    config: &ExtrapolationConfig,
) -> Result<DVector<f64>> {
    let (m, k) = sequence.shape();
    if k <= 2 {
        return Err(ExtrapolationError::InsufficientColumns { ncols: k });
    }
    config.validate()?;
    trace!(nrows = m, ncols = k, "mpe");

    let delta = compute_delta(sequence);
    check_finite_differences(&delta)?;
    let n = delta.ncols() - 1;
    let nn = k - 1;
    let a = delta.columns(0, n).into_owned();

    // One slot past the solution is reserved for the appended coefficient
    let mut coeffs = vec![0.0; m.max(n).max(nn)];
    for (dst, &src) in coeffs.iter_mut().zip(delta.column(n).iter()) {
        *dst = src;
    }

    let rtol = config.rank_rtol_for(m, n);
    let rank = solve_least_squares_in_place(&a, &mut coeffs, rtol)?;
    debug!(rank = rank, ncoeffs = n, "mpe coefficients solved");

    coeffs[n] = -1.0;
    let weights = &coeffs[..nn];
    let sum: f64 = weights.iter().sum();
    let abs_sum: f64 = weights.iter().map(|c| c.abs()).sum();
    if !sum.is_finite() || sum.abs() <= config.normalization_rtol * abs_sum {
        return Err(ExtrapolationError::DegenerateNormalization { sum });
    }
    let scale = 1.0 / sum;

    // result = scale * sequence[:, 0..k-1] * c
    let mut result = DVector::<f64>::zeros(m);
    gemv(
        m,
        nn,
        scale,
        &sequence.as_slice()[..m * nn],
        weights,
        0.0,
        result.as_mut_slice(),
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_mpe_scalar_geometric() {
        let sequence = DMatrix::from_row_slice(1, 5, &[1.0, 0.5, 0.25, 0.125, 0.0625]);
        let result = mpe(&sequence).unwrap();

        assert_eq!(result.len(), 1);
        assert_abs_diff_eq!(result[0], 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_mpe_three_columns() {
        // x_i = -1 + 0.5^i
        let sequence = DMatrix::from_row_slice(1, 3, &[0.0, -0.5, -0.75]);
        let result = mpe(&sequence).unwrap();
        assert_abs_diff_eq!(result[0], -1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_mpe_insufficient_columns() {
        for k in 0..=2 {
            let sequence = DMatrix::<f64>::zeros(3, k);
            assert_eq!(
                mpe(&sequence),
                Err(ExtrapolationError::InsufficientColumns { ncols: k })
            );
        }
    }

    #[test]
    fn test_mpe_arithmetic_progression_is_degenerate() {
        // Constant differences make the normalized weights undefined
        let sequence = DMatrix::from_row_slice(1, 5, &[0.0, 1.0, 2.0, 3.0, 4.0]);
        assert!(matches!(
            mpe(&sequence),
            Err(ExtrapolationError::DegenerateNormalization { .. })
        ));
    }

    #[test]
    fn test_mpe_degenerate_reports_sum() {
        // With three columns the single coefficient is 1, cancelling the -1
        let sequence = DMatrix::from_row_slice(1, 3, &[0.0, 1.0, 2.0]);
        match mpe(&sequence) {
            Err(ExtrapolationError::DegenerateNormalization { sum }) => {
                assert!(sum.abs() < 1e-12);
            }
            other => panic!("expected degenerate normalization, got {:?}", other),
        }
    }

    #[test]
    fn test_mpe_overflowing_differences() {
        let sequence = DMatrix::from_row_slice(1, 3, &[-1e308, 1e308, 0.0]);
        match mpe(&sequence) {
            Err(ExtrapolationError::SolverFailure(msg)) => {
                assert!(msg.contains("differences"), "unexpected message: {}", msg);
            }
            other => panic!("expected solver failure, got {:?}", other),
        }
    }

    #[test]
    fn test_mpe_zero_rows_is_solver_failure() {
        let sequence = DMatrix::<f64>::zeros(0, 3);
        assert!(matches!(
            mpe(&sequence),
            Err(ExtrapolationError::SolverFailure(_))
        ));
    }
}
