//! Matrix-vector product with pluggable BLAS backend
//!
//! Computes `y := alpha * A * x + beta * y` for a column-major `A`.
//!
//! # Design
//! - **Default**: Pure Rust nalgebra backend (no external dependencies)
//! - **Optional**: External BLAS `dgemv` via function pointer injection
//! - **Thread-safe**: Global dispatcher protected by RwLock
//!
//! # Example
//! ```ignore
//! use extrapolatr_rust::gemv::{gemv, set_blas_backend};
//!
//! // Use default nalgebra backend
//! gemv(m, n, 1.0, &a, &x, 0.0, &mut y);
//!
//! // Or inject custom BLAS
//! unsafe {
//!     set_blas_backend(my_dgemv_ptr);
//! }
//! gemv(m, n, 1.0, &a, &x, 0.0, &mut y); // Now uses custom BLAS
//! ```

use nalgebra::{DMatrixView, DVectorView, DVectorViewMut};
use once_cell::sync::Lazy;
use std::sync::RwLock;

//==============================================================================
// BLAS Function Pointer Types
//==============================================================================

/// BLAS dgemv function pointer type (LP64: 32-bit integers)
///
/// Signature matches CBLAS dgemv:
/// ```c
/// void cblas_dgemv(
///     CblasOrder order,          // 101 (RowMajor) or 102 (ColMajor)
///     CblasTranspose trans,      // 111 (NoTrans), 112 (Trans)
///     int m, int n,
///     double alpha,
///     const double *a, int lda,
///     const double *x, int incx,
///     double beta,
///     double *y, int incy
/// );
/// ```
pub type DgemvFnPtr = unsafe extern "C" fn(
    order: libc::c_int,
    trans: libc::c_int,
    m: libc::c_int,
    n: libc::c_int,
    alpha: libc::c_double,
    a: *const libc::c_double,
    lda: libc::c_int,
    x: *const libc::c_double,
    incx: libc::c_int,
    beta: libc::c_double,
    y: *mut libc::c_double,
    incy: libc::c_int,
);

/// BLAS dgemv function pointer type (ILP64: 64-bit integers)
pub type Dgemv64FnPtr = unsafe extern "C" fn(
    order: libc::c_int,
    trans: libc::c_int,
    m: i64,
    n: i64,
    alpha: libc::c_double,
    a: *const libc::c_double,
    lda: i64,
    x: *const libc::c_double,
    incx: i64,
    beta: libc::c_double,
    y: *mut libc::c_double,
    incy: i64,
);

const CBLAS_COL_MAJOR: libc::c_int = 102;
const CBLAS_NO_TRANS: libc::c_int = 111;

//==============================================================================
// GemvBackend Trait
//==============================================================================

/// GEMV backend trait for runtime dispatch
pub trait GemvBackend: Send + Sync {
    /// `y := alpha * A * x + beta * y` with `A` column-major (m × n)
    #[allow(clippy::too_many_arguments)]
    fn dgemv(
        &self,
        m: usize,
        n: usize,
        alpha: f64,
        a: &[f64],
        x: &[f64],
        beta: f64,
        y: &mut [f64],
    );

    /// Returns true if this backend uses 64-bit integers (ILP64)
    fn is_ilp64(&self) -> bool {
        false
    }

    /// Returns backend name for debugging
    fn name(&self) -> &'static str;
}

//==============================================================================
// Nalgebra Backend (Default, Pure Rust)
//==============================================================================

struct NalgebraBackend;

impl GemvBackend for NalgebraBackend {
    fn dgemv(
        &self,
        m: usize,
        n: usize,
        alpha: f64,
        a: &[f64],
        x: &[f64],
        beta: f64,
        y: &mut [f64],
    ) {
        let a_view = DMatrixView::from_slice(a, m, n);
        let x_view = DVectorView::from_slice(x, n);
        let mut y_view = DVectorViewMut::from_slice(y, m);

        // nalgebra does not read y when beta is zero
        y_view.gemv(alpha, &a_view, &x_view, beta);
    }

    fn name(&self) -> &'static str {
        "Nalgebra (Pure Rust)"
    }
}

//==============================================================================
// External BLAS Backends (LP64 and ILP64)
//==============================================================================

struct ExternalBlasBackend {
    dgemv: DgemvFnPtr,
}

impl GemvBackend for ExternalBlasBackend {
    fn dgemv(
        &self,
        m: usize,
        n: usize,
        alpha: f64,
        a: &[f64],
        x: &[f64],
        beta: f64,
        y: &mut [f64],
    ) {
        assert!(
            m <= i32::MAX as usize,
            "Matrix dimension m too large for LP64 BLAS"
        );
        assert!(
            n <= i32::MAX as usize,
            "Matrix dimension n too large for LP64 BLAS"
        );

        unsafe {
            (self.dgemv)(
                CBLAS_COL_MAJOR,
                CBLAS_NO_TRANS,
                m as i32,
                n as i32,
                alpha,
                a.as_ptr(),
                m.max(1) as i32, // lda
                x.as_ptr(),
                1,
                beta,
                y.as_mut_ptr(),
                1,
            );
        }
    }

    fn name(&self) -> &'static str {
        "External BLAS (LP64)"
    }
}

struct ExternalBlas64Backend {
    dgemv64: Dgemv64FnPtr,
}

impl GemvBackend for ExternalBlas64Backend {
    fn dgemv(
        &self,
        m: usize,
        n: usize,
        alpha: f64,
        a: &[f64],
        x: &[f64],
        beta: f64,
        y: &mut [f64],
    ) {
        unsafe {
            (self.dgemv64)(
                CBLAS_COL_MAJOR,
                CBLAS_NO_TRANS,
                m as i64,
                n as i64,
                alpha,
                a.as_ptr(),
                m.max(1) as i64,
                x.as_ptr(),
                1,
                beta,
                y.as_mut_ptr(),
                1,
            );
        }
    }

    fn is_ilp64(&self) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "External BLAS (ILP64)"
    }
}

//==============================================================================
// Global Dispatcher
//==============================================================================

static BLAS_DISPATCHER: Lazy<RwLock<Box<dyn GemvBackend>>> =
    Lazy::new(|| RwLock::new(Box::new(NalgebraBackend)));

fn install_backend(backend: Box<dyn GemvBackend>) {
    let mut dispatcher = BLAS_DISPATCHER
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *dispatcher = backend;
}

/// Set BLAS backend (LP64: 32-bit integers)
///
/// # Safety
/// - Function pointer must be valid and thread-safe
/// - Must remain valid for the lifetime of the program
/// - Must follow CBLAS calling convention
///
/// # Example
/// ```ignore
/// unsafe {
///     set_blas_backend(cblas_dgemv as _);
/// }
/// ```
pub unsafe fn set_blas_backend(dgemv: DgemvFnPtr) {
    install_backend(Box::new(ExternalBlasBackend { dgemv }));
}

/// Set ILP64 BLAS backend (64-bit integers)
///
/// # Safety
/// - Function pointer must be valid, thread-safe, and use 64-bit integers
/// - Must remain valid for the lifetime of the program
/// - Must follow CBLAS calling convention with ILP64 interface
pub unsafe fn set_ilp64_backend(dgemv64: Dgemv64FnPtr) {
    install_backend(Box::new(ExternalBlas64Backend { dgemv64 }));
}

/// Reset the dispatcher to the default nalgebra backend
pub fn clear_blas_backend() {
    install_backend(Box::new(NalgebraBackend));
}

/// Get current BLAS backend information
///
/// Returns:
/// - `(backend_name, is_external, is_ilp64)`
pub fn get_backend_info() -> (&'static str, bool, bool) {
    let dispatcher = BLAS_DISPATCHER
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    let name = dispatcher.name();
    let is_external = !name.contains("Nalgebra");
    let is_ilp64 = dispatcher.is_ilp64();
    (name, is_external, is_ilp64)
}

//==============================================================================
// Public API
//==============================================================================

/// Scaled matrix-vector product: `y := alpha * A * x + beta * y`
///
/// Dispatches to registered BLAS backend (external or nalgebra).
///
/// # Arguments
/// * `m`, `n` - Shape of `A`
/// * `a` - Column-major matrix data (length m * n)
/// * `x` - Input vector (length n)
/// * `y` - Accumulator (length m); not read when `beta == 0`
///
/// # Panics
/// Panics if slice lengths do not match `m` and `n`
pub fn gemv(m: usize, n: usize, alpha: f64, a: &[f64], x: &[f64], beta: f64, y: &mut [f64]) {
    assert_eq!(
        a.len(),
        m * n,
        "Matrix data length {} does not match {}x{}",
        a.len(),
        m,
        n
    );
    assert_eq!(x.len(), n, "x.len()={} must equal n={}", x.len(), n);
    assert_eq!(y.len(), m, "y.len()={} must equal m={}", y.len(), m);

    if m == 0 {
        return;
    }

    let dispatcher = BLAS_DISPATCHER
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    dispatcher.dgemv(m, n, alpha, a, x, beta, y);
}
