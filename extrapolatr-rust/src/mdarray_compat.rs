//! Compatibility layer between mdarray and nalgebra
//!
//! Lets callers holding sequences as `mdarray::DTensor` (rows = vector
//! components, columns = terms) use the extrapolation routines directly.

use mdarray::DTensor;
use nalgebra::{DMatrix, DVector};

use crate::error::Result;
use crate::{mpe, rre};

/// Convert mdarray DTensor to nalgebra DMatrix
pub fn dtensor_to_dmatrix(tensor: &DTensor<f64, 2>) -> DMatrix<f64> {
    let (m, n) = *tensor.shape();
    DMatrix::from_fn(m, n, |i, j| tensor[[i, j]])
}

/// Convert nalgebra DMatrix to mdarray DTensor
pub fn dmatrix_to_dtensor(matrix: &DMatrix<f64>) -> DTensor<f64, 2> {
    let (m, n) = matrix.shape();
    DTensor::<f64, 2>::from_fn([m, n], |idx| matrix[(idx[0], idx[1])])
}

fn into_vec(v: DVector<f64>) -> Vec<f64> {
    v.as_slice().to_vec()
}

/// RRE on a sequence stored as a DTensor
pub fn rre_tensor(sequence: &DTensor<f64, 2>) -> Result<Vec<f64>> {
    rre(&dtensor_to_dmatrix(sequence)).map(into_vec)
}

/// MPE on a sequence stored as a DTensor
pub fn mpe_tensor(sequence: &DTensor<f64, 2>) -> Result<Vec<f64>> {
    mpe(&dtensor_to_dmatrix(sequence)).map(into_vec)
}
