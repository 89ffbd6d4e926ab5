use crate::scalar::Scalar;
use crate::segment::Segment;
use crate::utils::min_max;
use crate::{Point, Vector};

use core::ops::Range;

/// A linear segment.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct LineSegment<S> {
    pub from: Point<S>,
    pub to: Point<S>,
}

impl<S: Scalar> LineSegment<S> {
    /// Sample the segment at t (expecting t between 0 and 1).
    #[inline]
    pub fn sample(&self, t: S) -> Point<S> {
        self.from.lerp(self.to, t)
    }

    #[inline]
    pub fn from(&self) -> Point<S> {
        self.from
    }

    #[inline]
    pub fn to(&self) -> Point<S> {
        self.to
    }

    /// The derivative is constant along a line segment.
    #[inline]
    pub fn derivative(&self, _t: S) -> Vector<S> {
        self.to_vector()
    }

    /// Returns the vector between this segment's `from` and `to` points.
    #[inline]
    pub fn to_vector(&self) -> Vector<S> {
        self.to - self.from
    }

    /// Computes the length of this segment.
    #[inline]
    pub fn length(&self) -> S {
        self.to_vector().length()
    }

    /// Computes the squared length of this segment.
    #[inline]
    pub fn square_length(&self) -> S {
        self.to_vector().square_length()
    }

    /// Same as `length`, the tolerance is ignored.
    #[inline]
    pub fn approximate_length(&self, _tolerance: S) -> S {
        self.length()
    }

    /// Swap the beginning and the end of the segment.
    pub fn flip(&self) -> Self {
        LineSegment {
            from: self.to,
            to: self.from,
        }
    }

    #[inline]
    pub fn bounding_range_x(&self) -> (S, S) {
        min_max(self.from.x, self.to.x)
    }

    #[inline]
    pub fn bounding_range_y(&self) -> (S, S) {
        min_max(self.from.y, self.to.y)
    }

    /// Distance between a point and the closest point of the segment.
    pub fn distance_to_point(&self, p: Point<S>) -> S {
        let v = self.to_vector();
        let square_length = v.square_length();
        if square_length <= S::EPSILON * S::EPSILON {
            return (p - self.from).length();
        }

        let t = ((p - self.from).dot(v) / square_length).max(S::ZERO).min(S::ONE);

        (p - self.sample(t)).length()
    }

    /// A line segment is already flat, the callback is invoked once with the full
    /// parameter range.
    pub fn for_each_flattened_with_t<F>(&self, _tolerance: S, callback: &mut F)
    where
        F: FnMut(&LineSegment<S>, Range<S>),
    {
        callback(self, S::ZERO..S::ONE);
    }
}

impl<S: Scalar> Segment for LineSegment<S> {
    impl_segment!(S);
}

#[cfg(test)]
use crate::point;

#[test]
fn line_length() {
    let l = LineSegment {
        from: point(1.0f32, 1.0),
        to: point(4.0, 5.0),
    };

    assert_eq!(l.length(), 5.0);
    assert_eq!(l.square_length(), 25.0);
    assert_eq!(l.sample(0.5), point(2.5, 3.0));
    assert_eq!(l.flip().from, point(4.0, 5.0));
}

#[test]
fn distance_to_point() {
    let l = LineSegment {
        from: point(0.0f32, 0.0),
        to: point(10.0, 0.0),
    };

    assert_eq!(l.distance_to_point(point(5.0, 3.0)), 3.0);
    assert_eq!(l.distance_to_point(point(-4.0, 3.0)), 5.0);
    assert_eq!(l.distance_to_point(point(13.0, -4.0)), 5.0);

    let degenerate = LineSegment {
        from: point(1.0f32, 1.0),
        to: point(1.0, 1.0),
    };
    assert_eq!(degenerate.distance_to_point(point(1.0, 3.0)), 2.0);
}

#[test]
fn line_bounding_box() {
    let l = LineSegment {
        from: point(3.0f32, -1.0),
        to: point(-2.0, 4.0),
    };

    let b = l.bounding_box();
    assert_eq!(b.min, point(-2.0, -1.0));
    assert_eq!(b.max, point(3.0, 4.0));
}
