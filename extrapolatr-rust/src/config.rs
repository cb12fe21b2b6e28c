//! Numerical tolerances for RRE and MPE

use crate::error::{ExtrapolationError, Result};

/// Default relative tolerance for detecting a vanishing MPE coefficient sum
pub const DEFAULT_NORMALIZATION_RTOL: f64 = 1e-12;

/// Configuration shared by both extrapolation methods
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtrapolationConfig {
    /// Relative cutoff for singular values in the least-squares solve.
    ///
    /// `None` selects `max(m, n) * f64::EPSILON` for an m×n system.
    pub rank_rtol: Option<f64>,
    /// MPE fails when `|sum(c)| <= normalization_rtol * sum(|c|)`
    pub normalization_rtol: f64,
}

impl Default for ExtrapolationConfig {
    fn default() -> Self {
        Self {
            rank_rtol: None,
            normalization_rtol: DEFAULT_NORMALIZATION_RTOL,
        }
    }
}

impl ExtrapolationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rank_rtol(mut self, rtol: f64) -> Self {
        self.rank_rtol = Some(rtol);
        self
    }

    pub fn with_normalization_rtol(mut self, rtol: f64) -> Self {
        self.normalization_rtol = rtol;
        self
    }

    /// Rank cutoff to use for an `nrows × ncols` coefficient matrix
    pub fn rank_rtol_for(&self, nrows: usize, ncols: usize) -> f64 {
        self.rank_rtol
            .unwrap_or_else(|| nrows.max(ncols).max(1) as f64 * f64::EPSILON)
    }

    /// Check that both tolerances are usable
    pub fn validate(&self) -> Result<()> {
        if let Some(rtol) = self.rank_rtol {
            if !(rtol > 0.0 && rtol < 1.0) {
                return Err(ExtrapolationError::InvalidTolerance(format!(
                    "Rank tolerance must be in (0, 1), got {:?}",
                    rtol
                )));
            }
        }
        if !self.normalization_rtol.is_finite() || self.normalization_rtol < 0.0 {
            return Err(ExtrapolationError::InvalidTolerance(format!(
                "Normalization tolerance must be finite and non-negative, got {:?}",
                self.normalization_rtol
            )));
        }
        Ok(())
    }
}
