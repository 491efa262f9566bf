//! Pure vector arithmetic used by the drop and cloth integrators
//!
//! Every operation returns a new value; inputs are never written to. The
//! fixed-arity versions take `nalgebra::SVector<f64, D>` so mismatched
//! lengths cannot compile. The `*_dyn` versions accept runtime-length
//! `DVector<f64>` and panic on a length mismatch, which is always a
//! programming error in this crate.
//!
//! # Example
//! ```
//! use rain_cloth_core::core_types::vector_math::{add, distance, scale, sub};
//! use rain_cloth_core::Vec3;
//!
//! let a = Vec3::new(1.0, 2.0, 3.0);
//! let b = Vec3::new(0.5, -1.0, 4.0);
//! let back = sub(&add(&a, &b), &b);
//! assert!(distance(&a, &back) < 1e-12);
//! assert_eq!(scale(&a, 2.0), Vec3::new(2.0, 4.0, 6.0));
//! ```

use nalgebra::{DVector, SVector};

/// Component-wise sum `a + b`
#[inline]
#[must_use]
pub fn add<const D: usize>(a: &SVector<f64, D>, b: &SVector<f64, D>) -> SVector<f64, D> {
    a + b
}

/// Component-wise difference `a - b`
#[inline]
#[must_use]
pub fn sub<const D: usize>(a: &SVector<f64, D>, b: &SVector<f64, D>) -> SVector<f64, D> {
    a - b
}

/// Multiply every component by `k`
#[inline]
#[must_use]
pub fn scale<const D: usize>(a: &SVector<f64, D>, k: f64) -> SVector<f64, D> {
    a * k
}

/// Euclidean norm of `b - a`
#[inline]
#[must_use]
pub fn distance<const D: usize>(a: &SVector<f64, D>, b: &SVector<f64, D>) -> f64 {
    (b - a).norm()
}

#[track_caller]
fn assert_same_len(op: &str, a: &DVector<f64>, b: &DVector<f64>) {
    assert_eq!(
        a.len(),
        b.len(),
        "{op}: vector length mismatch ({} vs {})",
        a.len(),
        b.len()
    );
}

/// Runtime-length [`add`]. Panics if the lengths differ.
#[must_use]
#[track_caller]
pub fn add_dyn(a: &DVector<f64>, b: &DVector<f64>) -> DVector<f64> {
    assert_same_len("add", a, b);
    a + b
}

/// Runtime-length [`sub`]. Panics if the lengths differ.
#[must_use]
#[track_caller]
pub fn sub_dyn(a: &DVector<f64>, b: &DVector<f64>) -> DVector<f64> {
    assert_same_len("sub", a, b);
    a - b
}

/// Runtime-length [`scale`].
#[must_use]
pub fn scale_dyn(a: &DVector<f64>, k: f64) -> DVector<f64> {
    a * k
}

/// Runtime-length [`distance`]. Panics if the lengths differ.
#[must_use]
#[track_caller]
pub fn distance_dyn(a: &DVector<f64>, b: &DVector<f64>) -> f64 {
    assert_same_len("distance", a, b);
    (b - a).norm()
}
