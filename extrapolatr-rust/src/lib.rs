//! # extrapolatr-rust: convergence acceleration for vector sequences
//!
//! Estimates the limit (or antilimit) of a vector-valued sequence from a
//! short run of its terms by removing geometric components algebraically.
//! A sequence is an m×k matrix whose columns are successive terms.
//!
//! Two methods are provided:
//! - [`rre`] - Reduced Rank Extrapolation, built on second differences
//! - [`mpe`] - Minimal Polynomial Extrapolation, built on first differences
//!
//! Both share the column difference operator in [`delta`] and the
//! minimum-norm SVD least-squares solve in [`lstsq`]. Neither method checks
//! whether the input converges: divergent geometric sequences are
//! extrapolated to their antilimit.

pub mod config;
pub mod delta;
pub mod error;
pub mod gemv; // Matrix-vector product utilities (nalgebra backend)
pub mod lstsq; // Minimum-norm least squares via SVD
pub mod mdarray_compat;
pub mod method;
pub mod mpe;
pub mod rre;
pub mod sequence;

// Re-export commonly used types and functions
pub use config::ExtrapolationConfig;
pub use delta::compute_delta;
pub use error::{ExtrapolationError, Result};
pub use lstsq::{LeastSquaresSolution, solve_least_squares, solve_least_squares_in_place};
pub use method::{Method, extrapolate};
pub use mpe::{mpe, mpe_with_config};
pub use rre::{rre, rre_with_config};
pub use sequence::sequence_from_terms;

// Re-export external dependencies for convenience
pub use mdarray::DTensor;
pub use nalgebra::{DMatrix, DVector};
