//! Building a sequence matrix from individual terms

use nalgebra::DMatrix;

use crate::error::{ExtrapolationError, Result};

/// Stack term vectors as the columns of a sequence matrix
///
/// All terms must share the same length m; the result is m×k for k terms.
pub fn sequence_from_terms<T: AsRef<[f64]>>(terms: &[T]) -> Result<DMatrix<f64>> {
    let nrows = terms.first().map_or(0, |t| t.as_ref().len());

    for (index, term) in terms.iter().enumerate() {
        let found = term.as_ref().len();
        if found != nrows {
            return Err(ExtrapolationError::RaggedTerms {
                index,
                expected: nrows,
                found,
            });
        }
    }

    let data: Vec<f64> = terms
        .iter()
        .flat_map(|t| t.as_ref().iter().copied())
        .collect();
    Ok(DMatrix::from_vec(nrows, terms.len(), data))
}
