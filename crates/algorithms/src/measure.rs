//! Perform cached arc-length measurements on a path.
//!
use crate::math::*;
use crate::path::{Path, PathEvent, PathSegment};

use std::vec::Vec;

enum MeasuredEvent {
    Begin(Point),
    Edge(PathSegment),
}

struct Entry {
    event: MeasuredEvent,
    sub_path: usize,
}

struct Edge {
    // distance from the beginning of the path
    distance: f32,
    // which entry this edge is on
    index: usize,
    // t-value of the endpoint on the segment
    t: f32,
}

/// The result of sampling a path at a given distance.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct PathSample {
    position: Point,
    tangent: Vector,
    distance: f32,
    sub_path: usize,
}

impl PathSample {
    #[inline]
    pub fn position(&self) -> Point {
        self.position
    }

    /// Unit tangent of the path at the sample, or the zero vector where it is undefined.
    #[inline]
    pub fn tangent(&self) -> Vector {
        self.tangent
    }

    /// Distance from the beginning of the path, after clamping.
    #[inline]
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Index of the sub-path the sample lies on.
    #[inline]
    pub fn sub_path(&self) -> usize {
        self.sub_path
    }
}

/// An acceleration structure for sampling distances along a specific path.
///
/// Building the measurements costs about as much as flattening the entire path once.
/// Queries are then made via a [PathSampler](struct.PathSampler.html), which keeps a
/// cursor into the measurements so that queries with increasing distances are cheap.
///
/// Sub-paths are measured one after the other: the distance at the beginning of a
/// sub-path is the distance at the end of the previous one. The closing edge of a closed
/// sub-path counts towards its length.
///
/// ## Example
///
/// ```
/// use sweep_algorithms::{
///     math::point,
///     path::Path,
///     measure::PathMeasurements,
/// };
///
/// let mut path = Path::builder();
/// path.begin(point(0.0, 0.0));
/// path.quadratic_bezier_to(point(1.0, 1.0), point(2.0, 0.0));
/// path.end(false);
/// let path = path.build();
///
/// // Build the acceleration structure.
/// let measurements = PathMeasurements::from_path(&path, 1e-3);
/// let mut sampler = measurements.create_sampler();
///
/// let sample = sampler.sample(measurements.length() * 0.5).unwrap();
/// println!("Mid-point position: {:?}, tangent: {:?}", sample.position(), sample.tangent());
/// ```
pub struct PathMeasurements {
    entries: Vec<Entry>,
    edges: Vec<Edge>,
    end: Option<Point>,
}

impl PathMeasurements {
    /// Create empty path measurements.
    pub fn empty() -> Self {
        PathMeasurements {
            entries: Vec::new(),
            edges: Vec::new(),
            end: None,
        }
    }

    /// Create path measurements initialized with a `Path`.
    pub fn from_path(path: &Path, tolerance: f32) -> Self {
        let mut m = Self::empty();
        m.initialize(path.iter(), tolerance);

        m
    }

    /// Initialize the path measurements with a sequence of path events.
    ///
    /// Previously allocated memory is reused.
    pub fn initialize<Iter>(&mut self, path: Iter, tolerance: f32)
    where
        Iter: IntoIterator<Item = PathEvent>,
    {
        let tolerance = tolerance.max(1e-4);
        self.entries.clear();
        self.edges.clear();
        self.end = None;

        let mut distance = 0.0;
        let mut sub_path = 0;
        let mut started = false;
        for event in path.into_iter() {
            self.end = Some(event.to());
            let index = self.entries.len();
            match event {
                PathEvent::Begin { at } => {
                    if started {
                        sub_path += 1;
                    }
                    started = true;
                    self.entries.push(Entry {
                        event: MeasuredEvent::Begin(at),
                        sub_path,
                    });
                    self.edges.push(Edge {
                        distance,
                        index,
                        t: 1.0,
                    });
                }
                _ => {
                    let segment = match event.to_segment() {
                        Some(segment) => segment,
                        None => continue,
                    };

                    let edges = &mut self.edges;
                    segment.for_each_flattened_with_t(tolerance, &mut |line, t| {
                        distance += line.length();
                        edges.push(Edge {
                            distance,
                            index,
                            t: t.end,
                        });
                    });
                    self.entries.push(Entry {
                        event: MeasuredEvent::Edge(segment),
                        sub_path,
                    });
                }
            }
        }

        debug_assert!(self.edges.first().map_or(true, |edge| edge.distance == 0.0));
    }

    /// Returns the approximate length of the path.
    pub fn length(&self) -> f32 {
        self.edges.last().map_or(0.0, |edge| edge.distance)
    }

    /// The position where the path ends, if the path is not empty.
    ///
    /// This is exact: it is not affected by the flattening approximation.
    pub fn end_position(&self) -> Option<Point> {
        self.end
    }

    /// Returns true if the measurements contain no endpoint.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Create an object that can perform fast sample queries on the measured path.
    pub fn create_sampler(&self) -> PathSampler<'_> {
        PathSampler {
            measurements: self,
            cursor: 0,
        }
    }
}

/// Performs sample queries on a path with cached measurements.
///
/// The sampler only holds a cursor into the measurements, which remain immutable and can
/// be shared by several samplers. Queries are fastest when made in increasing distance
/// order.
pub struct PathSampler<'l> {
    measurements: &'l PathMeasurements,
    cursor: usize,
}

impl<'l> PathSampler<'l> {
    /// Sample at a given distance along the path.
    ///
    /// The distance is clamped to the beginning and end of the path.
    /// Returns `None` if the path is empty.
    pub fn sample(&mut self, distance: f32) -> Option<PathSample> {
        let measurements = self.measurements;
        let edges = &measurements.edges;
        if edges.is_empty() {
            return None;
        }

        let length = measurements.length();
        let distance = if distance.is_nan() {
            0.0
        } else {
            distance.max(0.0).min(length)
        };

        self.move_cursor(distance);

        let edge = &edges[self.cursor];
        let entry = &measurements.entries[edge.index];
        let (position, tangent) = match entry.event {
            MeasuredEvent::Begin(at) => (at, vector(0.0, 0.0)),
            MeasuredEvent::Edge(ref segment) => {
                let (prev_distance, prev_t) = match self.cursor.checked_sub(1) {
                    Some(prev) if edges[prev].index == edge.index => {
                        (edges[prev].distance, edges[prev].t)
                    }
                    Some(prev) => (edges[prev].distance, 0.0),
                    None => (0.0, 0.0),
                };

                let span = edge.distance - prev_distance;
                let ratio = if span > 0.0 {
                    (distance - prev_distance) / span
                } else {
                    1.0
                };
                let t = prev_t + (edge.t - prev_t) * ratio;

                (segment.sample(t), unit_tangent(segment, t))
            }
        };

        Some(PathSample {
            position,
            tangent,
            distance,
            sub_path: entry.sub_path,
        })
    }

    /// Sample at a normalized position along the path (0 at the start, 1 at the end).
    pub fn sample_normalized(&mut self, fraction: f32) -> Option<PathSample> {
        let length = self.measurements.length();
        self.sample(fraction * length)
    }

    /// Returns the approximate length of the path.
    pub fn length(&self) -> f32 {
        self.measurements.length()
    }

    // Place the cursor on the first edge that ends at or after the requested distance.
    fn move_cursor(&mut self, distance: f32) {
        let edges = &self.measurements.edges[..];
        while self.cursor + 1 < edges.len() && edges[self.cursor].distance < distance {
            self.cursor += 1;
        }
        while self.cursor > 0 && edges[self.cursor - 1].distance >= distance {
            self.cursor -= 1;
        }
    }
}

fn unit_tangent(segment: &PathSegment, t: f32) -> Vector {
    let derivative = segment.derivative(t);
    if derivative.square_length() > 1e-12 {
        return derivative.normalize();
    }

    // Degenerate derivative (for example at a cusp): fall back to the chord.
    let chord = segment.to() - segment.from();
    if chord.square_length() > 1e-12 {
        chord.normalize()
    } else {
        vector(0.0, 0.0)
    }
}

#[cfg(test)]
fn square_path() -> Path {
    let mut builder = Path::builder();
    builder.begin(point(0.0, 0.0));
    builder.line_to(point(10.0, 0.0));
    builder.line_to(point(10.0, 10.0));
    builder.line_to(point(0.0, 10.0));
    builder.close();
    builder.build()
}

#[test]
fn measure_square() {
    let path = square_path();
    let measurements = PathMeasurements::from_path(&path, 0.01);
    assert_eq!(measurements.length(), 40.0);
    assert_eq!(measurements.end_position(), Some(point(0.0, 0.0)));

    let mut sampler = measurements.create_sampler();
    let expected = [
        (0.0, point(0.0, 0.0)),
        (5.0, point(5.0, 0.0)),
        (10.0, point(10.0, 0.0)),
        (15.0, point(10.0, 5.0)),
        (25.0, point(5.0, 10.0)),
        (35.0, point(0.0, 5.0)),
        (40.0, point(0.0, 0.0)),
    ];
    for &(distance, position) in &expected {
        let sample = sampler.sample(distance).unwrap();
        assert!(
            (sample.position() - position).length() < 1e-5,
            "{:?} at {}",
            sample,
            distance
        );
    }

    // Out of order queries move the cursor back.
    let sample = sampler.sample(12.0).unwrap();
    assert!((sample.position() - point(10.0, 2.0)).length() < 1e-5);
    assert_eq!(sample.tangent(), vector(0.0, 1.0));
}

#[test]
fn measure_clamps_distance() {
    let path = square_path();
    let measurements = PathMeasurements::from_path(&path, 0.01);
    let mut sampler = measurements.create_sampler();

    assert_eq!(sampler.sample(-5.0).unwrap().position(), point(0.0, 0.0));
    assert_eq!(sampler.sample(-5.0).unwrap().distance(), 0.0);
    assert!((sampler.sample(100.0).unwrap().position() - point(0.0, 0.0)).length() < 1e-5);
    assert_eq!(sampler.sample(100.0).unwrap().distance(), 40.0);
    assert_eq!(sampler.sample(f32::NAN).unwrap().distance(), 0.0);
}

#[test]
fn measure_normalized() {
    let path = square_path();
    let measurements = PathMeasurements::from_path(&path, 0.01);
    let mut sampler = measurements.create_sampler();

    let sample = sampler.sample_normalized(0.5).unwrap();
    assert!((sample.position() - point(10.0, 10.0)).length() < 1e-5);
}

#[test]
fn measure_empty_path() {
    let path = Path::new();
    let measurements = PathMeasurements::from_path(&path, 0.01);
    assert!(measurements.is_empty());
    assert_eq!(measurements.length(), 0.0);
    assert_eq!(measurements.end_position(), None);
    assert!(measurements.create_sampler().sample(0.0).is_none());
}

#[test]
fn measure_single_point() {
    let mut builder = Path::builder();
    builder.begin(point(3.0, 4.0));
    builder.end(false);
    let path = builder.build();

    let measurements = PathMeasurements::from_path(&path, 0.01);
    assert_eq!(measurements.length(), 0.0);
    assert_eq!(measurements.end_position(), Some(point(3.0, 4.0)));

    let sample = measurements.create_sampler().sample(0.0).unwrap();
    assert_eq!(sample.position(), point(3.0, 4.0));
}

#[test]
fn measure_sub_paths() {
    let mut builder = Path::builder();
    builder.begin(point(0.0, 0.0));
    builder.line_to(point(10.0, 0.0));
    builder.end(false);
    builder.begin(point(0.0, 20.0));
    builder.line_to(point(10.0, 20.0));
    builder.end(false);
    let path = builder.build();

    let measurements = PathMeasurements::from_path(&path, 0.01);
    assert_eq!(measurements.length(), 20.0);

    let mut sampler = measurements.create_sampler();
    let first = sampler.sample(5.0).unwrap();
    assert_eq!(first.sub_path(), 0);
    assert!((first.position() - point(5.0, 0.0)).length() < 1e-5);

    let second = sampler.sample(15.0).unwrap();
    assert_eq!(second.sub_path(), 1);
    assert!((second.position() - point(5.0, 20.0)).length() < 1e-5);
}

#[test]
fn measure_curve_matches_approximate_length() {
    use crate::length::approximate_length;

    let mut builder = Path::builder();
    builder.begin(point(0.0, 0.0));
    builder.cubic_bezier_to(point(0.0, 50.0), point(100.0, 50.0), point(100.0, 0.0));
    builder.end(false);
    let path = builder.build();

    let measurements = PathMeasurements::from_path(&path, 0.01);
    let expected = approximate_length(&path, 0.01);
    assert!((measurements.length() - expected).abs() < 1e-3);

    // The middle of a symmetric curve is at half of its length.
    let mid = measurements
        .create_sampler()
        .sample(measurements.length() * 0.5)
        .unwrap();
    assert!((mid.position().x - 50.0).abs() < 0.05);
    assert!((mid.tangent() - vector(1.0, 0.0)).length() < 1e-2);
}
