//! Small numeric helpers shared by the segment types.

use crate::scalar::Scalar;
use arrayvec::ArrayVec;

#[inline]
pub fn min_max<S: Scalar>(a: S, b: S) -> (S, S) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Number of uniform parameter steps needed to flatten a polynomial curve within
/// `tolerance`, following Wang's formula.
///
/// `degree_factor` is `n * (n - 1) / 8` for a curve of degree `n` and `max_second_difference`
/// is the largest norm of the control polygon's second differences.
pub fn wang_segment_count<S: Scalar>(degree_factor: S, max_second_difference: S, tolerance: S) -> u32 {
    debug_assert!(tolerance > S::ZERO);
    let n = (degree_factor * max_second_difference / tolerance).sqrt().ceil();
    if !(n >= S::ONE) {
        // Also catches NaN.
        return 1;
    }

    // Keep pathological inputs from producing absurd subdivision counts.
    n.min(S::value(65_536.0)).to_u32().unwrap_or(1)
}

/// Roots of `a * x² + b * x + c` in the open interval ]0, 1[.
pub fn quadratic_roots_in_unit_interval<S: Scalar>(a: S, b: S, c: S) -> ArrayVec<S, 2> {
    let mut result = ArrayVec::new();
    let mut push = |t: S| {
        if t > S::ZERO && t < S::ONE {
            result.push(t);
        }
    };

    if a.abs() < S::EPSILON {
        if b.abs() >= S::EPSILON {
            push(-c / b);
        }
        return result;
    }

    let discriminant = b * b - S::value(4.0) * a * c;
    if discriminant < S::ZERO {
        return result;
    }

    let sqrt_d = discriminant.sqrt();
    let inv_2a = S::ONE / (S::TWO * a);
    push((-b - sqrt_d) * inv_2a);
    if sqrt_d > S::ZERO {
        push((-b + sqrt_d) * inv_2a);
    }

    result
}

#[test]
fn wang_count_for_straight_curve() {
    assert_eq!(wang_segment_count(0.75f32, 0.0, 0.1), 1);
    assert_eq!(wang_segment_count(0.75f32, f32::NAN, 0.1), 1);
}

#[test]
fn wang_count_grows_with_curvature() {
    let low = wang_segment_count(0.75f32, 10.0, 0.1);
    let high = wang_segment_count(0.75f32, 1000.0, 0.1);
    assert!(low < high);
    assert_eq!(low, 9);
    assert_eq!(high, 87);
}

#[test]
fn roots_in_unit_interval() {
    // (x - 0.25) * (x - 0.5)
    let roots = quadratic_roots_in_unit_interval(1.0f64, -0.75, 0.125);
    assert_eq!(roots.len(), 2);
    assert!((roots[0] - 0.25).abs() < 1e-9);
    assert!((roots[1] - 0.5).abs() < 1e-9);

    // Linear case: 2x - 1.
    let roots = quadratic_roots_in_unit_interval(0.0f64, 2.0, -1.0);
    assert_eq!(roots.as_slice(), &[0.5]);

    // Root outside of the interval.
    let roots = quadratic_roots_in_unit_interval(0.0f64, 1.0, -2.0);
    assert!(roots.is_empty());
}
