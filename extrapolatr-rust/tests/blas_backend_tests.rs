//! Injecting an external dgemv through the CBLAS function pointer interface

use extrapolatr_rust::gemv::{clear_blas_backend, get_backend_info, set_blas_backend};
use extrapolatr_rust::{DMatrix, mpe, rre};

/// Column-major, no-transpose, unit-stride CBLAS dgemv written in Rust
unsafe extern "C" fn reference_dgemv(
    _order: libc::c_int,
    _trans: libc::c_int,
    m: libc::c_int,
    n: libc::c_int,
    alpha: libc::c_double,
    a: *const libc::c_double,
    lda: libc::c_int,
    x: *const libc::c_double,
    _incx: libc::c_int,
    beta: libc::c_double,
    y: *mut libc::c_double,
    _incy: libc::c_int,
) {
    let (m, n, lda) = (m as usize, n as usize, lda as usize);
    unsafe {
        let a = std::slice::from_raw_parts(a, lda * n);
        let x = std::slice::from_raw_parts(x, n);
        let y = std::slice::from_raw_parts_mut(y, m);
        for i in 0..m {
            let ax: f64 = (0..n).map(|j| a[i + j * lda] * x[j]).sum();
            y[i] = if beta == 0.0 { alpha * ax } else { alpha * ax + beta * y[i] };
        }
    }
}

#[test]
fn test_external_backend_drives_extrapolation() {
    unsafe {
        set_blas_backend(reference_dgemv);
    }
    let (name, is_external, is_ilp64) = get_backend_info();
    assert_eq!(name, "External BLAS (LP64)");
    assert!(is_external);
    assert!(!is_ilp64);

    let vals = [1.0, 0.5, 0.25, 0.125, 0.0625];
    let mut data = vals.to_vec();
    data.extend(vals.iter().map(|v| 2.0 + v));
    let sequence = DMatrix::from_row_slice(2, 5, &data);

    let via_rre = rre(&sequence).unwrap();
    let via_mpe = mpe(&sequence).unwrap();

    clear_blas_backend();
    assert_eq!(get_backend_info().0, "Nalgebra (Pure Rust)");

    for result in [via_rre, via_mpe] {
        assert!(result[0].abs() < 1e-9);
        assert!((result[1] - 2.0).abs() < 1e-9);
    }
}
