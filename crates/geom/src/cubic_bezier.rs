//! Cubic bézier curve segments.

use crate::scalar::Scalar;
use crate::segment::Segment;
use crate::utils::{min_max, quadratic_roots_in_unit_interval, wang_segment_count};
use crate::{LineSegment, Point, Vector};
use arrayvec::ArrayVec;

use core::ops::Range;

/// A 2d curve segment defined by four points: the beginning of the segment, two control
/// points and the end of the segment.
///
/// The curve is defined by equation:
/// ```∀ t ∈ [0..1],  P(t) = (1 - t)³ * from + 3 * (1 - t)² * t * ctrl1 + 3 * t² * (1 - t) * ctrl2 + t³ * to```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct CubicBezierSegment<S> {
    pub from: Point<S>,
    pub ctrl1: Point<S>,
    pub ctrl2: Point<S>,
    pub to: Point<S>,
}

impl<S: Scalar> CubicBezierSegment<S> {
    /// Sample the curve at t (expecting t between 0 and 1).
    pub fn sample(&self, t: S) -> Point<S> {
        let t2 = t * t;
        let t3 = t2 * t;
        let one_t = S::ONE - t;
        let one_t2 = one_t * one_t;
        let one_t3 = one_t2 * one_t;

        self.from * one_t3
            + self.ctrl1.to_vector() * S::THREE * one_t2 * t
            + self.ctrl2.to_vector() * S::THREE * one_t * t2
            + self.to.to_vector() * t3
    }

    /// Sample the curve's derivative at t (expecting t between 0 and 1).
    pub fn derivative(&self, t: S) -> Vector<S> {
        let one_t = S::ONE - t;
        (self.ctrl1 - self.from) * S::THREE * one_t * one_t
            + (self.ctrl2 - self.ctrl1) * S::SIX * one_t * t
            + (self.to - self.ctrl2) * S::THREE * t * t
    }

    #[inline]
    pub fn from(&self) -> Point<S> {
        self.from
    }

    #[inline]
    pub fn to(&self) -> Point<S> {
        self.to
    }

    /// Returns the line segment between the two endpoints.
    pub fn baseline(&self) -> LineSegment<S> {
        LineSegment {
            from: self.from,
            to: self.to,
        }
    }

    /// Number of line segments used to flatten this curve within `tolerance`.
    pub fn num_flattening_steps(&self, tolerance: S) -> u32 {
        let d1 = (self.from - self.ctrl1.to_vector() * S::TWO + self.ctrl2.to_vector())
            .to_vector()
            .length();
        let d2 = (self.ctrl1 - self.ctrl2.to_vector() * S::TWO + self.to.to_vector())
            .to_vector()
            .length();

        // Wang's formula with n = 3: n * (n - 1) / 8 = 0.75.
        wang_segment_count(S::value(0.75), d1.max(d2), tolerance)
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

        // Do the last step manually to make sure we finish at t = 1.0 exactly.
        let s = LineSegment { from, to: self.to };
        callback(&s, t_from..S::ONE);
    }

    /// Approximates the curve with sequence of line segments.
    pub fn for_each_flattened<F>(&self, tolerance: S, callback: &mut F)
    where
        F: FnMut(&LineSegment<S>),
    {
        self.for_each_flattened_with_t(tolerance, &mut |segment, _| callback(segment));
    }

    /// Compute the length of the segment using a flattened approximation.
    pub fn approximate_length(&self, tolerance: S) -> S {
        let mut length = S::ZERO;
        self.for_each_flattened(tolerance, &mut |segment| {
            length += segment.length();
        });

        length
    }

    // Parameter values where the derivative of one coordinate cancels out.
    fn extrema_t(from: S, ctrl1: S, ctrl2: S, to: S) -> ArrayVec<S, 2> {
        // The derivative divided by 3 is a * t² + b * t + c with:
        let a = to - from + S::THREE * (ctrl1 - ctrl2);
        let b = S::TWO * (from - S::TWO * ctrl1 + ctrl2);
        let c = ctrl1 - from;

        quadratic_roots_in_unit_interval(a, b, c)
    }

    pub fn bounding_range_x(&self) -> (S, S) {
        let (mut min, mut max) = min_max(self.from.x, self.to.x);
        for t in Self::extrema_t(self.from.x, self.ctrl1.x, self.ctrl2.x, self.to.x) {
            let x = self.sample(t).x;
            min = min.min(x);
            max = max.max(x);
        }

        (min, max)
    }

    pub fn bounding_range_y(&self) -> (S, S) {
        let (mut min, mut max) = min_max(self.from.y, self.to.y);
        for t in Self::extrema_t(self.from.y, self.ctrl1.y, self.ctrl2.y, self.to.y) {
            let y = self.sample(t).y;
            min = min.min(y);
            max = max.max(y);
        }

        (min, max)
    }
}

impl<S: Scalar> Segment for CubicBezierSegment<S> {
    impl_segment!(S);
}

#[cfg(test)]
use crate::{point, vector};

#[test]
fn cubic_sample_endpoints() {
    let curve = CubicBezierSegment {
        from: point(0.0f32, 0.0),
        ctrl1: point(0.0, 10.0),
        ctrl2: point(10.0, 10.0),
        to: point(10.0, 0.0),
    };

    assert_eq!(curve.sample(0.0), curve.from);
    assert_eq!(curve.sample(1.0), curve.to);
    assert_eq!(curve.sample(0.5), point(5.0, 7.5));
    assert_eq!(curve.derivative(0.0), vector(0.0, 30.0));
    assert_eq!(curve.derivative(1.0), vector(0.0, -30.0));
}

#[test]
fn cubic_flattening_is_continuous() {
    let curve = CubicBezierSegment {
        from: point(0.0f32, 0.0),
        ctrl1: point(100.0, 0.0),
        ctrl2: point(0.0, 100.0),
        to: point(100.0, 100.0),
    };

    let mut prev = curve.from;
    let mut prev_t = 0.0;
    curve.for_each_flattened_with_t(0.1, &mut |segment, t| {
        assert_eq!(segment.from, prev);
        assert_eq!(t.start, prev_t);
        prev = segment.to;
        prev_t = t.end;
    });

    assert_eq!(prev, curve.to);
    assert_eq!(prev_t, 1.0);
}

#[test]
fn cubic_flattening_tolerance() {
    let curve = CubicBezierSegment {
        from: point(0.0f64, 0.0),
        ctrl1: point(30.0, 80.0),
        ctrl2: point(70.0, -80.0),
        to: point(100.0, 0.0),
    };

    let tolerance = 0.05;
    curve.for_each_flattened_with_t(tolerance, &mut |segment, t| {
        let mid_t = (t.start + t.end) * 0.5;
        let on_curve = curve.sample(mid_t);
        assert!(segment.distance_to_point(on_curve) <= tolerance);
    });
}

#[test]
fn cubic_straight_length() {
    let curve = CubicBezierSegment {
        from: point(0.0f64, 0.0),
        ctrl1: point(10.0, 0.0),
        ctrl2: point(20.0, 0.0),
        to: point(30.0, 0.0),
    };

    assert_eq!(curve.num_flattening_steps(0.01), 1);
    assert!((curve.approximate_length(0.01) - 30.0).abs() < 1e-9);
}

#[test]
fn cubic_quarter_circle_length() {
    // Standard approximation of a quarter of the unit circle.
    let k = 0.5522847498f64;
    let curve = CubicBezierSegment {
        from: point(1.0, 0.0),
        ctrl1: point(1.0, k),
        ctrl2: point(k, 1.0),
        to: point(0.0, 1.0),
    };

    let expected = core::f64::consts::PI / 2.0;
    assert!((curve.approximate_length(0.0001) - expected).abs() < 1e-3);
}

#[test]
fn cubic_bounding_box() {
    let curve = CubicBezierSegment {
        from: point(0.0f32, 0.0),
        ctrl1: point(0.0, 10.0),
        ctrl2: point(10.0, 10.0),
        to: point(10.0, 0.0),
    };

    let b = curve.bounding_box();
    assert_eq!(b.min, point(0.0, 0.0));
    assert_eq!(b.max.x, 10.0);
    assert!((b.max.y - 7.5).abs() < 1e-5);
}

#[test]
fn quadratic_elevation_matches() {
    let quad = crate::QuadraticBezierSegment {
        from: point(0.0f64, 0.0),
        ctrl: point(5.0, 8.0),
        to: point(10.0, 0.0),
    };
    let cubic = quad.to_cubic();
    for i in 0..=10 {
        let t = i as f64 / 10.0;
        assert!((quad.sample(t) - cubic.sample(t)).length() < 1e-9);
    }
}
