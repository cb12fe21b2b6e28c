//! Error types for sequence extrapolation

/// Failures reported by the extrapolation entry points
///
/// Every variant is surfaced to the immediate caller; nothing is retried
/// internally since the computation is deterministic.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExtrapolationError {
    /// The sequence has fewer than three terms (columns)
    #[error("Need at least 3 columns, got {ncols}")]
    InsufficientColumns { ncols: usize },

    /// The least-squares solve rejected its input or did not converge
    #[error("Least-squares solve failed: {0}")]
    SolverFailure(String),

    /// MPE coefficients sum to (numerically) zero and cannot be normalized
    #[error("Coefficient sum {sum:e} is numerically zero, cannot normalize")]
    DegenerateNormalization { sum: f64 },

    #[error("Invalid tolerance: {0}")]
    InvalidTolerance(String),

    /// Term vectors passed to a sequence builder disagree in length
    #[error("Term {index} has length {found}, expected {expected}")]
    RaggedTerms {
        index: usize,
        expected: usize,
        found: usize,
    },

    #[error("Unknown extrapolation method: {0}")]
    UnknownMethod(String),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, ExtrapolationError>;
