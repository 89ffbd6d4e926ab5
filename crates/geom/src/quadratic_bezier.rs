//! Quadratic bézier curve segments.

use crate::scalar::Scalar;
use crate::segment::Segment;
use crate::utils::{min_max, quadratic_roots_in_unit_interval, wang_segment_count};
use crate::{LineSegment, Point, Vector};

use core::ops::Range;

/// A 2d curve segment defined by three points: the beginning of the segment, a control
/// point and the end of the segment.
///
/// The curve is defined by equation:
/// ```∀ t ∈ [0..1],  P(t) = (1 - t)² * from + 2 * (1 - t) * t * ctrl + t² * to```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct QuadraticBezierSegment<S> {
    pub from: Point<S>,
    pub ctrl: Point<S>,
    pub to: Point<S>,
}

impl<S: Scalar> QuadraticBezierSegment<S> {
    /// Sample the curve at t (expecting t between 0 and 1).
    pub fn sample(&self, t: S) -> Point<S> {
        let t2 = t * t;
        let one_t = S::ONE - t;
        let one_t2 = one_t * one_t;

        self.from * one_t2 + self.ctrl.to_vector() * S::TWO * one_t * t + self.to.to_vector() * t2
    }

    /// Sample the curve's derivative at t (expecting t between 0 and 1).
    pub fn derivative(&self, t: S) -> Vector<S> {
        let one_t = S::ONE - t;
        (self.ctrl - self.from) * S::TWO * one_t + (self.to - self.ctrl) * S::TWO * t
    }

    #[inline]
    pub fn from(&self) -> Point<S> {
        self.from
    }

    #[inline]
    pub fn to(&self) -> Point<S> {
        self.to
    }

    /// Elevate this curve to a cubic bézier.
    pub fn to_cubic(&self) -> crate::CubicBezierSegment<S> {
        let third = S::ONE / S::THREE;
        crate::CubicBezierSegment {
            from: self.from,
            ctrl1: self.from + (self.ctrl - self.from) * S::TWO * third,
            ctrl2: self.to + (self.ctrl - self.to) * S::TWO * third,
            to: self.to,
        }
    }

    /// Number of line segments used to flatten this curve within `tolerance`.
    pub fn num_flattening_steps(&self, tolerance: S) -> u32 {
        let dd = (self.from - self.ctrl.to_vector() * S::TWO + self.to.to_vector())
            .to_vector()
            .length();

        // Wang's formula with n = 2: n * (n - 1) / 8 = 0.25.
        wang_segment_count(S::value(0.25), dd, tolerance)
    }

    /// Approximates the curve with sequence of line segments.
    ///
    /// The `tolerance` parameter defines the maximum distance between the curve and
    /// its approximation.
    ///
    /// The end of the t parameter range at the final segment is guaranteed to be equal to `1.0`.
    pub fn for_each_flattened_with_t<F>(&self, tolerance: S, callback: &mut F)
    where
        F: FnMut(&LineSegment<S>, Range<S>),
    {
        let count = self.num_flattening_steps(tolerance);
        let step = S::ONE / S::value(count as f32);

        let mut from = self.from;
        let mut t_from = S::ZERO;
        for i in 1..count {
            let t = step * S::value(i as f32);
            let s = LineSegment {
                from,
                to: self.sample(t),
            };
            callback(&s, t_from..t);
            from = s.to;
            t_from = t;
        }

        let s = LineSegment { from, to: self.to };
        callback(&s, t_from..S::ONE);
    }

    /// Compute the length of the segment using a flattened approximation.
    pub fn approximate_length(&self, tolerance: S) -> S {
        let mut length = S::ZERO;
        self.for_each_flattened_with_t(tolerance, &mut |segment, _| {
            length += segment.length();
        });

        length
    }

    fn extremum_t(from: S, ctrl: S, to: S) -> Option<S> {
        // Root of the derivative: 2 * ((ctrl - from) + t * (from - 2 * ctrl + to)).
        quadratic_roots_in_unit_interval(S::ZERO, from - S::TWO * ctrl + to, ctrl - from)
            .first()
            .cloned()
    }

    pub fn bounding_range_x(&self) -> (S, S) {
        let (mut min, mut max) = min_max(self.from.x, self.to.x);
        if let Some(t) = Self::extremum_t(self.from.x, self.ctrl.x, self.to.x) {
            let x = self.sample(t).x;
            min = min.min(x);
            max = max.max(x);
        }

        (min, max)
    }

    pub fn bounding_range_y(&self) -> (S, S) {
        let (mut min, mut max) = min_max(self.from.y, self.to.y);
        if let Some(t) = Self::extremum_t(self.from.y, self.ctrl.y, self.to.y) {
            let y = self.sample(t).y;
            min = min.min(y);
            max = max.max(y);
        }

        (min, max)
    }
}

impl<S: Scalar> Segment for QuadraticBezierSegment<S> {
    impl_segment!(S);
}

#[cfg(test)]
use crate::point;

#[test]
fn quadratic_sample() {
    let curve = QuadraticBezierSegment {
        from: point(0.0f32, 0.0),
        ctrl: point(1.0, 2.0),
        to: point(2.0, 0.0),
    };

    assert_eq!(curve.sample(0.0), point(0.0, 0.0));
    assert_eq!(curve.sample(0.5), point(1.0, 1.0));
    assert_eq!(curve.sample(1.0), point(2.0, 0.0));
    assert_eq!(curve.derivative(0.5), crate::vector(2.0, 0.0));
}

#[test]
fn quadratic_flattening_ends_at_one() {
    let curve = QuadraticBezierSegment {
        from: point(0.0f32, 0.0),
        ctrl: point(50.0, 100.0),
        to: point(100.0, 0.0),
    };

    let mut count = 0;
    let mut last = None;
    let mut prev_t = 0.0;
    curve.for_each_flattened_with_t(0.01, &mut |segment, t| {
        assert_eq!(t.start, prev_t);
        assert!(t.end > t.start);
        prev_t = t.end;
        last = Some((*segment, t));
        count += 1;
    });

    let (segment, t) = last.unwrap();
    assert_eq!(t.end, 1.0);
    assert_eq!(segment.to, curve.to);
    assert_eq!(count, curve.num_flattening_steps(0.01));
}

#[test]
fn quadratic_length() {
    // A degenerate quadratic along the x axis.
    let line = QuadraticBezierSegment {
        from: point(0.0f64, 0.0),
        ctrl: point(5.0, 0.0),
        to: point(10.0, 0.0),
    };
    assert!((line.approximate_length(0.01) - 10.0).abs() < 1e-9);

    // The arc of y = x² between -1 and 1. The exact length is
    // sqrt(5) + asinh(2) / 2.
    let parabola = QuadraticBezierSegment {
        from: point(-1.0f64, 1.0),
        ctrl: point(0.0, -1.0),
        to: point(1.0, 1.0),
    };
    let expected = 5.0f64.sqrt() + 2.0f64.asinh() / 2.0;
    assert!((parabola.approximate_length(0.0001) - expected).abs() < 1e-3);
}

#[test]
fn quadratic_bounding_box() {
    let curve = QuadraticBezierSegment {
        from: point(0.0f32, 0.0),
        ctrl: point(1.0, 2.0),
        to: point(2.0, 0.0),
    };

    let b = curve.bounding_box();
    assert_eq!(b.min, point(0.0, 0.0));
    assert!((b.max.y - 1.0).abs() < 1e-6);
    assert_eq!(b.max.x, 2.0);
}
