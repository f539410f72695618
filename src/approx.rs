//! Utilities to approximate equality of floating point values.
//!
//! Used by the test suite to compare training outputs across paths and
//! against finite-difference estimates.

/// The max absolute error accepted on `f64` comparisons.
pub const F64_MAX_ERROR: f64 = 1e-9;

/// The max absolute error accepted on `f32` comparisons.
pub const F32_MAX_ERROR: f32 = 1e-4;

/// The max error accepted when checking analytic derivatives against a
/// centered finite-difference estimate.
pub const DERIVATIVE_MAX_ERROR: f64 = 1e-6;

/// Whether two `f64`s are within `tol` of each other.
#[must_use]
pub fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}

/// Whether two `f32`s are within `tol` of each other.
#[must_use]
pub fn approx_eq_f32(a: f32, b: f32, tol: f32) -> bool {
    (a - b).abs() <= tol
}

/// Whether two `f64` slices match pairwise within `tol`.
///
/// Slices of different lengths never compare equal.
#[must_use]
pub fn approx_eq_all(a: &[f64], b: &[f64], tol: f64) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(&x, &y)| approx_eq(x, y, tol))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_mismatch_is_never_equal() {
        assert!(!approx_eq_all(&[0.0], &[0.0, 0.0], 1.0));
    }

    #[test]
    fn tolerance_is_inclusive() {
        assert!(approx_eq(1.0, 1.0 + F64_MAX_ERROR, F64_MAX_ERROR));
        assert!(!approx_eq(1.0, 1.0 + 2.0 * F64_MAX_ERROR, F64_MAX_ERROR));
    }
}
