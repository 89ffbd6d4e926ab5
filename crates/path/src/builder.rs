//! Path building utilities.
//!
//! The [PathBuilder](trait.PathBuilder.html) trait is a simple interface which does not
//! deal with any ambiguous cases: every sub-path starts with `begin` and finishes with
//! `end` (or `close`). Producers of path data, such as the SVG path parser, write into
//! any `PathBuilder` implementation.
//!
//! ## Examples
//!
//! ```
//! use sweep_path::{Path, math::point};
//! use sweep_path::traits::PathBuilder;
//!
//! let mut builder = Path::builder();
//!
//! // All sub-paths *must* have be contained in a being/end pair.
//! builder.begin(point(0.0, 0.0));
//! builder.line_to(point(1.0, 0.0));
//! builder.quadratic_bezier_to(point(2.0, 0.0), point(2.0, 1.0));
//! builder.end(false);
//!
//! builder.begin(point(10.0, 0.0));
//! builder.cubic_bezier_to(point(12.0, 2.0), point(11.0, 2.0), point(5.0, 0.0));
//! builder.close(); // close() is equivalent to end(true).
//!
//! let path = builder.build();
//! ```

use crate::events::PathEvent;
use crate::math::*;

/// The base path building interface.
///
/// Unlike the SVG specification, this interface requires each sub-path to be
/// explicitly started with `begin` and terminated with `end`.
pub trait PathBuilder {
    /// Starts a new sub-path at a given position.
    fn begin(&mut self, at: Point);

    /// Ends the current sub-path.
    ///
    /// When `close` is true, a line is added between the current point and the
    /// first point of the sub-path.
    fn end(&mut self, close: bool);

    /// Closes the current sub-path.
    ///
    /// Shorthand for `builder.end(true)`.
    fn close(&mut self) {
        self.end(true)
    }

    /// Adds a line segment to the current sub-path.
    fn line_to(&mut self, to: Point);

    /// Adds a quadratic bézier curve to the current sub-path.
    fn quadratic_bezier_to(&mut self, ctrl: Point, to: Point);

    /// Adds a cubic bézier curve to the current sub-path.
    fn cubic_bezier_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point);

    /// Hints the expected number of endpoints and control points.
    fn reserve(&mut self, _endpoints: usize, _ctrl_points: usize) {}

    /// Applies the provided path event.
    fn path_event(&mut self, event: PathEvent) {
        match event {
            PathEvent::Begin { at } => {
                self.begin(at);
            }
            PathEvent::Line { to, .. } => {
                self.line_to(to);
            }
            PathEvent::Quadratic { ctrl, to, .. } => {
                self.quadratic_bezier_to(ctrl, to);
            }
            PathEvent::Cubic {
                ctrl1, ctrl2, to, ..
            } => {
                self.cubic_bezier_to(ctrl1, ctrl2, to);
            }
            PathEvent::End { close, .. } => {
                self.end(close);
            }
        }
    }

    /// Adds a closed polyline.
    fn add_polygon(&mut self, points: &[Point]) {
        if points.is_empty() {
            return;
        }

        self.begin(points[0]);
        for p in &points[1..] {
            self.line_to(*p);
        }
        self.close();
    }

    /// Adds a circle approximated with four cubic bézier curves.
    fn add_circle(&mut self, center: Point, radius: f32) {
        // Control point distance for a quarter circle.
        const K: f32 = 0.552_284_8;
        let r = radius.abs();
        let k = r * K;

        self.begin(center + vector(r, 0.0));
        self.cubic_bezier_to(
            center + vector(r, k),
            center + vector(k, r),
            center + vector(0.0, r),
        );
        self.cubic_bezier_to(
            center + vector(-k, r),
            center + vector(-r, k),
            center + vector(-r, 0.0),
        );
        self.cubic_bezier_to(
            center + vector(-r, -k),
            center + vector(-k, -r),
            center + vector(0.0, -r),
        );
        self.cubic_bezier_to(
            center + vector(k, -r),
            center + vector(r, -k),
            center + vector(r, 0.0),
        );
        self.close();
    }
}
