use crate::geom::{CubicBezierSegment, LineSegment, QuadraticBezierSegment, Segment};
use crate::math::Point;

/// Represents an event or edge of path.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum PathEvent {
    Begin {
        at: Point,
    },
    Line {
        from: Point,
        to: Point,
    },
    Quadratic {
        from: Point,
        ctrl: Point,
        to: Point,
    },
    Cubic {
        from: Point,
        ctrl1: Point,
        ctrl2: Point,
        to: Point,
    },
    End {
        last: Point,
        first: Point,
        close: bool,
    },
}

impl PathEvent {
    /// Whether this event covers some distance along the path.
    ///
    /// `End` events are edges only when they close the sub-path.
    pub fn is_edge(&self) -> bool {
        match self {
            &PathEvent::Line { .. }
            | &PathEvent::Quadratic { .. }
            | &PathEvent::Cubic { .. }
            | &PathEvent::End { close: true, .. } => true,
            _ => false,
        }
    }

    /// The position where this event starts.
    pub fn from(&self) -> Point {
        match *self {
            PathEvent::Line { from, .. }
            | PathEvent::Quadratic { from, .. }
            | PathEvent::Cubic { from, .. }
            | PathEvent::Begin { at: from }
            | PathEvent::End { last: from, .. } => from,
        }
    }

    /// The position where the pen is after this event.
    ///
    /// For `End` events this is the first point of the sub-path when it is closed,
    /// and the last endpoint otherwise.
    pub fn to(&self) -> Point {
        match *self {
            PathEvent::Line { to, .. }
            | PathEvent::Quadratic { to, .. }
            | PathEvent::Cubic { to, .. }
            | PathEvent::Begin { at: to } => to,
            PathEvent::End {
                first, close: true, ..
            } => first,
            PathEvent::End { last, .. } => last,
        }
    }

    /// Returns the event as a segment, if it is an edge.
    pub fn to_segment(&self) -> Option<PathSegment> {
        match *self {
            PathEvent::Line { from, to } => Some(PathSegment::Line(LineSegment { from, to })),
            PathEvent::Quadratic { from, ctrl, to } => Some(PathSegment::Quadratic(
                QuadraticBezierSegment { from, ctrl, to },
            )),
            PathEvent::Cubic {
                from,
                ctrl1,
                ctrl2,
                to,
            } => Some(PathSegment::Cubic(CubicBezierSegment {
                from,
                ctrl1,
                ctrl2,
                to,
            })),
            PathEvent::End {
                last,
                first,
                close: true,
            } => Some(PathSegment::Line(LineSegment {
                from: last,
                to: first,
            })),
            _ => None,
        }
    }
}

/// One of the segment types a path edge can be made of.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PathSegment {
    Line(LineSegment<f32>),
    Quadratic(QuadraticBezierSegment<f32>),
    Cubic(CubicBezierSegment<f32>),
}

impl PathSegment {
    pub fn sample(&self, t: f32) -> Point {
        match self {
            PathSegment::Line(segment) => segment.sample(t),
            PathSegment::Quadratic(segment) => segment.sample(t),
            PathSegment::Cubic(segment) => segment.sample(t),
        }
    }

    pub fn derivative(&self, t: f32) -> crate::math::Vector {
        match self {
            PathSegment::Line(segment) => segment.derivative(t),
            PathSegment::Quadratic(segment) => segment.derivative(t),
            PathSegment::Cubic(segment) => segment.derivative(t),
        }
    }

    pub fn from(&self) -> Point {
        match self {
            PathSegment::Line(segment) => segment.from,
            PathSegment::Quadratic(segment) => segment.from,
            PathSegment::Cubic(segment) => segment.from,
        }
    }

    pub fn to(&self) -> Point {
        match self {
            PathSegment::Line(segment) => segment.to,
            PathSegment::Quadratic(segment) => segment.to,
            PathSegment::Cubic(segment) => segment.to,
        }
    }

    /// Returns the smallest rectangle that contains the segment.
    pub fn bounding_box(&self) -> crate::math::Box2D {
        match self {
            PathSegment::Line(segment) => segment.bounding_box(),
            PathSegment::Quadratic(segment) => segment.bounding_box(),
            PathSegment::Cubic(segment) => segment.bounding_box(),
        }
    }

    /// Approximates the segment with a sequence of line segments.
    ///
    /// The end of the t parameter range at the final segment is guaranteed to be equal to `1.0`.
    pub fn for_each_flattened_with_t<F>(&self, tolerance: f32, callback: &mut F)
    where
        F: FnMut(&LineSegment<f32>, core::ops::Range<f32>),
    {
        match self {
            PathSegment::Line(segment) => segment.for_each_flattened_with_t(tolerance, callback),
            PathSegment::Quadratic(segment) => {
                segment.for_each_flattened_with_t(tolerance, callback)
            }
            PathSegment::Cubic(segment) => segment.for_each_flattened_with_t(tolerance, callback),
        }
    }
}

#[cfg(test)]
use crate::math::point;

#[test]
fn end_event_destination() {
    let closed = PathEvent::End {
        last: point(1.0, 1.0),
        first: point(0.0, 0.0),
        close: true,
    };
    let open = PathEvent::End {
        last: point(1.0, 1.0),
        first: point(0.0, 0.0),
        close: false,
    };

    assert!(closed.is_edge());
    assert!(!open.is_edge());
    assert_eq!(closed.to(), point(0.0, 0.0));
    assert_eq!(open.to(), point(1.0, 1.0));
    assert_eq!(
        closed.to_segment(),
        Some(PathSegment::Line(LineSegment {
            from: point(1.0, 1.0),
            to: point(0.0, 0.0)
        }))
    );
    assert_eq!(open.to_segment(), None);
}

#[test]
fn segment_dispatch() {
    let evt = PathEvent::Quadratic {
        from: point(0.0, 0.0),
        ctrl: point(1.0, 2.0),
        to: point(2.0, 0.0),
    };
    let segment = evt.to_segment().unwrap();

    assert_eq!(segment.from(), point(0.0, 0.0));
    assert_eq!(segment.to(), point(2.0, 0.0));
    assert_eq!(segment.sample(0.5), point(1.0, 1.0));
}
