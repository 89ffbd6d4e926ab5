//! The default path data structure.

use crate::builder::PathBuilder;
use crate::events::PathEvent;
use crate::math::*;

use std::fmt;
use std::iter::FromIterator;

/// Enumeration corresponding to the [PathEvent](../enum.PathEvent.html) enum
/// without the parameters.
///
/// This is used by the [Path](struct.Path.html) data structure to store path events a tad
/// more efficiently.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub(crate) enum Verb {
    LineTo,
    QuadraticTo,
    CubicTo,
    Begin,
    Close,
    End,
}

/// A simple path data structure.
///
/// A path is a sequence of sub-paths, each starting with a `Begin` event, followed by
/// lines and bézier curves and terminated by an `End` event which optionally closes the
/// sub-path. Paths are immutable once built.
///
/// # Representation
///
/// Paths contain two buffers:
/// - a buffer of commands (Begin, Line, Quadratic, Cubic, Close or End),
/// - and a buffer of points that can be endpoints or control points.
///
/// The order of storage for points is determined by the sequence of commands.
#[derive(Clone, Default, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Path {
    points: Box<[Point]>,
    verbs: Box<[Verb]>,
}

impl Path {
    /// Creates a [Builder](struct.Builder.html) to build a path.
    pub fn builder() -> Builder {
        Builder::new()
    }

    /// Creates an empty path.
    pub fn new() -> Path {
        Path::default()
    }

    /// Iterates over the path's events.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(&self.points[..], &self.verbs[..])
    }

    /// Returns true if the path does not contain any sub-path.
    pub fn is_empty(&self) -> bool {
        self.verbs.is_empty()
    }

    /// Number of sub-paths.
    pub fn num_sub_paths(&self) -> usize {
        self.verbs.iter().filter(|verb| **verb == Verb::Begin).count()
    }

    /// The first endpoint of the path, if any.
    pub fn first_endpoint(&self) -> Option<Point> {
        self.points.first().cloned()
    }

    /// The position of the pen after the last event of the path.
    ///
    /// This is the last endpoint, unless the last sub-path is closed in which case
    /// the position is the first endpoint of that sub-path.
    pub fn end_position(&self) -> Option<Point> {
        self.iter().last().map(|event| event.to())
    }

    /// All endpoints and control points of the path, in storage order.
    pub fn points(&self) -> &[Point] {
        &self.points[..]
    }
}

impl FromIterator<PathEvent> for Path {
    fn from_iter<T: IntoIterator<Item = PathEvent>>(iter: T) -> Path {
        let mut builder = Path::builder();
        for event in iter.into_iter() {
            builder.path_event(event);
        }

        builder.build()
    }
}

impl<'l> IntoIterator for &'l Path {
    type Item = PathEvent;
    type IntoIter = Iter<'l>;

    fn into_iter(self) -> Iter<'l> {
        self.iter()
    }
}

impl fmt::Debug for Path {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        fn write_point(formatter: &mut fmt::Formatter, point: Point) -> fmt::Result {
            write!(formatter, " {} {}", point.x, point.y)
        }

        write!(formatter, "\"")?;
        for event in self.iter() {
            match event {
                PathEvent::Begin { at } => {
                    write!(formatter, " M")?;
                    write_point(formatter, at)?;
                }
                PathEvent::Line { to, .. } => {
                    write!(formatter, " L")?;
                    write_point(formatter, to)?;
                }
                PathEvent::Quadratic { ctrl, to, .. } => {
                    write!(formatter, " Q")?;
                    write_point(formatter, ctrl)?;
                    write_point(formatter, to)?;
                }
                PathEvent::Cubic {
                    ctrl1, ctrl2, to, ..
                } => {
                    write!(formatter, " C")?;
                    write_point(formatter, ctrl1)?;
                    write_point(formatter, ctrl2)?;
                    write_point(formatter, to)?;
                }
                PathEvent::End { close: true, .. } => {
                    write!(formatter, " Z")?;
                }
                PathEvent::End { close: false, .. } => {}
            }
        }

        write!(formatter, "\"")
    }
}

#[inline]
fn nan_check(p: Point) {
    debug_assert!(p.x.is_finite());
    debug_assert!(p.y.is_finite());
}

/// Builds path objects.
///
/// Edges added outside of a sub-path implicitly begin one at the current position,
/// and beginning a sub-path while another one is in progress ends the latter without
/// closing it.
#[derive(Clone, Default)]
pub struct Builder {
    points: Vec<Point>,
    verbs: Vec<Verb>,
    first: Point,
    current: Point,
    in_sub_path: bool,
}

impl Builder {
    pub fn new() -> Self {
        Builder::default()
    }

    pub fn with_capacity(points: usize, edges: usize) -> Self {
        Builder {
            points: Vec::with_capacity(points),
            verbs: Vec::with_capacity(edges),
            ..Builder::default()
        }
    }

    pub fn begin(&mut self, at: Point) {
        nan_check(at);
        if self.in_sub_path {
            self.end(false);
        }

        self.first = at;
        self.current = at;
        self.in_sub_path = true;
        self.points.push(at);
        self.verbs.push(Verb::Begin);
    }

    pub fn end(&mut self, close: bool) {
        if !self.in_sub_path {
            return;
        }

        if close {
            self.points.push(self.first);
            self.current = self.first;
        }

        self.in_sub_path = false;
        self.verbs.push(if close { Verb::Close } else { Verb::End });
    }

    pub fn close(&mut self) {
        self.end(true);
    }

    pub fn line_to(&mut self, to: Point) {
        nan_check(to);
        self.ensure_sub_path();
        self.points.push(to);
        self.verbs.push(Verb::LineTo);
        self.current = to;
    }

    pub fn quadratic_bezier_to(&mut self, ctrl: Point, to: Point) {
        nan_check(ctrl);
        nan_check(to);
        self.ensure_sub_path();
        self.points.push(ctrl);
        self.points.push(to);
        self.verbs.push(Verb::QuadraticTo);
        self.current = to;
    }

    pub fn cubic_bezier_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) {
        nan_check(ctrl1);
        nan_check(ctrl2);
        nan_check(to);
        self.ensure_sub_path();
        self.points.push(ctrl1);
        self.points.push(ctrl2);
        self.points.push(to);
        self.verbs.push(Verb::CubicTo);
        self.current = to;
    }

    /// The position of the pen.
    pub fn current_position(&self) -> Point {
        self.current
    }

    /// Builds the path, ending the sub-path in progress if need be.
    pub fn build(mut self) -> Path {
        self.end(false);
        Path {
            points: self.points.into_boxed_slice(),
            verbs: self.verbs.into_boxed_slice(),
        }
    }

    fn ensure_sub_path(&mut self) {
        if !self.in_sub_path {
            let at = self.current;
            self.begin(at);
        }
    }
}

impl PathBuilder for Builder {
    fn begin(&mut self, at: Point) {
        self.begin(at);
    }

    fn end(&mut self, close: bool) {
        self.end(close);
    }

    fn line_to(&mut self, to: Point) {
        self.line_to(to);
    }

    fn quadratic_bezier_to(&mut self, ctrl: Point, to: Point) {
        self.quadratic_bezier_to(ctrl, to);
    }

    fn cubic_bezier_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) {
        self.cubic_bezier_to(ctrl1, ctrl2, to);
    }

    fn reserve(&mut self, endpoints: usize, ctrl_points: usize) {
        self.points.reserve(endpoints + ctrl_points);
        self.verbs.reserve(endpoints);
    }
}

/// An iterator of `PathEvent` for `Path`.
#[derive(Clone)]
pub struct Iter<'l> {
    points: std::slice::Iter<'l, Point>,
    verbs: std::slice::Iter<'l, Verb>,
    current: Point,
    first: Point,
}

impl<'l> Iter<'l> {
    fn new(points: &'l [Point], verbs: &'l [Verb]) -> Self {
        Iter {
            points: points.iter(),
            verbs: verbs.iter(),
            current: point(0.0, 0.0),
            first: point(0.0, 0.0),
        }
    }

    #[inline]
    fn next_point(&mut self) -> Point {
        // The builder guarantees that each verb has its points.
        self.points.next().cloned().unwrap_or(self.current)
    }
}

impl<'l> Iterator for Iter<'l> {
    type Item = PathEvent;
    #[inline]
    fn next(&mut self) -> Option<PathEvent> {
        match self.verbs.next() {
            Some(&Verb::Begin) => {
                self.current = self.next_point();
                self.first = self.current;
                Some(PathEvent::Begin { at: self.current })
            }
            Some(&Verb::LineTo) => {
                let from = self.current;
                self.current = self.next_point();
                Some(PathEvent::Line {
                    from,
                    to: self.current,
                })
            }
            Some(&Verb::QuadraticTo) => {
                let from = self.current;
                let ctrl = self.next_point();
                self.current = self.next_point();
                Some(PathEvent::Quadratic {
                    from,
                    ctrl,
                    to: self.current,
                })
            }
            Some(&Verb::CubicTo) => {
                let from = self.current;
                let ctrl1 = self.next_point();
                let ctrl2 = self.next_point();
                self.current = self.next_point();
                Some(PathEvent::Cubic {
                    from,
                    ctrl1,
                    ctrl2,
                    to: self.current,
                })
            }
            Some(&Verb::Close) => {
                let last = self.current;
                let _ = self.next_point();
                self.current = self.first;
                Some(PathEvent::End {
                    last,
                    first: self.first,
                    close: true,
                })
            }
            Some(&Verb::End) => {
                let last = self.current;
                Some(PathEvent::End {
                    last,
                    first: self.first,
                    close: false,
                })
            }
            None => None,
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.verbs.size_hint()
    }
}

#[test]
fn test_path_builder_simple() {
    let mut p = Path::builder();
    p.begin(point(0.0, 0.0));
    p.line_to(point(1.0, 0.0));
    p.quadratic_bezier_to(point(2.0, 0.0), point(2.0, 1.0));
    p.cubic_bezier_to(point(2.0, 2.0), point(1.0, 2.0), point(0.0, 2.0));
    p.close();
    let path = p.build();

    let mut it = path.iter();
    assert_eq!(it.next(), Some(PathEvent::Begin { at: point(0.0, 0.0) }));
    assert_eq!(
        it.next(),
        Some(PathEvent::Line {
            from: point(0.0, 0.0),
            to: point(1.0, 0.0)
        })
    );
    assert_eq!(
        it.next(),
        Some(PathEvent::Quadratic {
            from: point(1.0, 0.0),
            ctrl: point(2.0, 0.0),
            to: point(2.0, 1.0)
        })
    );
    assert_eq!(
        it.next(),
        Some(PathEvent::Cubic {
            from: point(2.0, 1.0),
            ctrl1: point(2.0, 2.0),
            ctrl2: point(1.0, 2.0),
            to: point(0.0, 2.0)
        })
    );
    assert_eq!(
        it.next(),
        Some(PathEvent::End {
            last: point(0.0, 2.0),
            first: point(0.0, 0.0),
            close: true
        })
    );
    assert_eq!(it.next(), None);

    assert_eq!(path.end_position(), Some(point(0.0, 0.0)));
    assert_eq!(path.first_endpoint(), Some(point(0.0, 0.0)));
    assert_eq!(path.num_sub_paths(), 1);
}

#[test]
fn test_path_builder_implicit_sub_paths() {
    let mut p = Path::builder();
    // No begin: the sub-path implicitly starts at the origin.
    p.line_to(point(1.0, 0.0));
    p.begin(point(5.0, 5.0));
    p.line_to(point(6.0, 5.0));
    // No end: build() terminates the sub-path.
    let path = p.build();

    let events: Vec<PathEvent> = path.iter().collect();
    assert_eq!(
        events,
        vec![
            PathEvent::Begin { at: point(0.0, 0.0) },
            PathEvent::Line {
                from: point(0.0, 0.0),
                to: point(1.0, 0.0)
            },
            PathEvent::End {
                last: point(1.0, 0.0),
                first: point(0.0, 0.0),
                close: false
            },
            PathEvent::Begin { at: point(5.0, 5.0) },
            PathEvent::Line {
                from: point(5.0, 5.0),
                to: point(6.0, 5.0)
            },
            PathEvent::End {
                last: point(6.0, 5.0),
                first: point(5.0, 5.0),
                close: false
            },
        ]
    );
    assert_eq!(path.end_position(), Some(point(6.0, 5.0)));
    assert_eq!(path.num_sub_paths(), 2);
}

#[test]
fn test_empty_path() {
    let path = Path::builder().build();
    assert!(path.is_empty());
    assert_eq!(path.iter().next(), None);
    assert_eq!(path.end_position(), None);
    assert_eq!(path.first_endpoint(), None);

    // Ending without beginning does nothing.
    let mut p = Path::builder();
    p.close();
    assert!(p.build().is_empty());
}

#[test]
fn test_path_from_iter() {
    let mut p = Path::builder();
    p.add_circle(point(10.0, 10.0), 5.0);
    let path = p.build();

    let copy: Path = path.iter().collect();
    assert_eq!(copy, path);
    assert_eq!(format!("{:?}", Path::builder().build()), "\"\"");
}

#[test]
fn test_path_debug() {
    let mut p = Path::builder();
    p.begin(point(0.0, 0.0));
    p.line_to(point(10.0, 0.0));
    p.close();

    assert_eq!(format!("{:?}", p.build()), "\" M 0 0 L 10 0 Z\"");
}
