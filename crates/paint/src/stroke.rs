//! Stroke a path with a gradient that follows its arc length.
//!
//! The path is sampled at regular arc-length intervals and each pair of consecutive
//! samples is stroked as a line segment. The color of a segment is the gradient color at
//! the fraction of the later sample of the pair, so the first segment already carries a
//! bit of the gradient and the last one has exactly the color at offset `1.0`.
//!
//! Segments are stroked with round joins to hide the seams between them. The canvas
//! style is saved before stroking and restored afterwards, whether stroking succeeds
//! or not.
//!
//! ## Example
//!
//! ```
//! use sweep_paint::stroke::{PathGradientStroker, PathGradientOptions};
//! use sweep_paint::{Color, Gradient, LineCap, PixelCanvas};
//! use sweep_paint::path::{Path, builder::PathBuilder};
//! use sweep_paint::math::point;
//!
//! let mut builder = Path::builder();
//! builder.add_circle(point(50.0, 50.0), 40.0);
//! let path = builder.build();
//!
//! let gradient = Gradient::two_stops(Color::RED, Color::BLUE);
//! let options = PathGradientOptions::DEFAULT
//!     .with_line_width(6.0)
//!     .with_line_cap(LineCap::Round)
//!     .with_step(0.5);
//!
//! let mut canvas = PixelCanvas::with_background(100, 100, Color::WHITE);
//! let mut stroker = PathGradientStroker::new();
//! stroker.stroke(&mut canvas, &path, &gradient, &options).unwrap();
//! ```

use crate::algorithms::measure::PathMeasurements;
use crate::algorithms::sample::{self, ArcLengthSample};
use crate::canvas::{Canvas, LineCap, LineJoin, ScopedStyle};
use crate::error::{InvalidArgument, PathGradientError};
use crate::gradient::{Gradient, GradientStop};
use crate::path::Path;

/// Parameters for the gradient stroker.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[non_exhaustive]
pub struct PathGradientOptions {
    /// Width of the stroke. Must be positive.
    ///
    /// Default value: `PathGradientOptions::DEFAULT_LINE_WIDTH`.
    pub line_width: f32,

    /// Cap of each stroked segment.
    ///
    /// Default value: `LineCap::Butt`.
    pub line_cap: LineCap,

    /// Distance along the path between two samples. Must be positive.
    ///
    /// Smaller steps produce smoother color transitions and more segments.
    ///
    /// Default value: `PathGradientOptions::DEFAULT_STEP`.
    pub step: f32,

    /// Maximum allowed distance to the path when measuring curves.
    ///
    /// Default value: `PathGradientOptions::DEFAULT_TOLERANCE`.
    pub tolerance: f32,
}

impl PathGradientOptions {
    pub const DEFAULT_LINE_WIDTH: f32 = 1.0;
    pub const DEFAULT_LINE_CAP: LineCap = LineCap::Butt;
    pub const DEFAULT_STEP: f32 = sample::DEFAULT_STEP;
    pub const DEFAULT_TOLERANCE: f32 = sample::DEFAULT_TOLERANCE;

    pub const DEFAULT: Self = PathGradientOptions {
        line_width: Self::DEFAULT_LINE_WIDTH,
        line_cap: Self::DEFAULT_LINE_CAP,
        step: Self::DEFAULT_STEP,
        tolerance: Self::DEFAULT_TOLERANCE,
    };

    #[inline]
    pub const fn with_line_width(mut self, width: f32) -> Self {
        self.line_width = width;
        self
    }

    #[inline]
    pub const fn with_line_cap(mut self, cap: LineCap) -> Self {
        self.line_cap = cap;
        self
    }

    #[inline]
    pub const fn with_step(mut self, step: f32) -> Self {
        self.step = step;
        self
    }

    #[inline]
    pub const fn with_tolerance(mut self, tolerance: f32) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Checks the parameters without stroking anything.
    pub fn validate(&self) -> Result<(), InvalidArgument> {
        if !(self.line_width > 0.0) || !self.line_width.is_finite() {
            return Err(InvalidArgument::LineWidth(self.line_width));
        }

        sample::validate(self.step, self.tolerance)?;

        Ok(())
    }
}

impl Default for PathGradientOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Strokes paths with arc-length gradients.
///
/// The stroker keeps its measurement and sample buffers between calls, which avoids
/// reallocating them when stroking many paths.
pub struct PathGradientStroker {
    measurements: PathMeasurements,
    samples: Vec<ArcLengthSample>,
}

impl PathGradientStroker {
    pub fn new() -> Self {
        PathGradientStroker {
            measurements: PathMeasurements::empty(),
            samples: Vec::new(),
        }
    }

    /// Strokes a path onto a canvas.
    ///
    /// Nothing is drawn if the path produces fewer than two samples (empty and zero
    /// length paths). Parameters are validated before the path is sampled.
    pub fn stroke<C: Canvas + ?Sized>(
        &mut self,
        canvas: &mut C,
        path: &Path,
        gradient: &Gradient,
        options: &PathGradientOptions,
    ) -> Result<(), PathGradientError> {
        options.validate()?;

        self.measurements.initialize(path.iter(), options.tolerance);
        self.samples.clear();
        sample::sample_measurements(&self.measurements, options.step, &mut self.samples)?;

        if self.samples.len() < 2 {
            debug!(
                "path gradient: {} sample(s), nothing to stroke",
                self.samples.len()
            );
            return Ok(());
        }

        let mut canvas = ScopedStyle::new(canvas);
        canvas.set_line_width(options.line_width);
        canvas.set_line_cap(options.line_cap);
        canvas.set_line_join(LineJoin::Round);

        let mut stroked = 0;
        for pair in self.samples.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            if prev.sub_path != next.sub_path {
                continue;
            }

            let color = gradient.color_at(next.fraction);
            trace!(
                "segment {:?} -> {:?} at {} with {}",
                prev.position,
                next.position,
                next.fraction,
                color
            );

            canvas.set_color(color);
            canvas.stroke_line(prev.position, next.position);
            stroked += 1;
        }

        debug!(
            "path gradient: length {}, {} samples, {} segments",
            self.measurements.length(),
            self.samples.len(),
            stroked
        );

        Ok(())
    }

    /// The samples of the last stroked path.
    pub fn samples(&self) -> &[ArcLengthSample] {
        &self.samples
    }
}

impl Default for PathGradientStroker {
    fn default() -> Self {
        Self::new()
    }
}

/// Strokes a path with a gradient that follows its arc length.
///
/// Convenience wrapper around [PathGradientStroker](struct.PathGradientStroker.html).
pub fn stroke_path_gradient<C: Canvas + ?Sized>(
    canvas: &mut C,
    path: &Path,
    gradient: &Gradient,
    options: &PathGradientOptions,
) -> Result<(), PathGradientError> {
    PathGradientStroker::new().stroke(canvas, path, gradient, options)
}

/// Same as `stroke_path_gradient`, building the gradient from a list of stops.
pub fn stroke_path_gradient_stops<C: Canvas + ?Sized>(
    canvas: &mut C,
    path: &Path,
    stops: &[GradientStop],
    options: &PathGradientOptions,
) -> Result<(), PathGradientError> {
    let gradient = Gradient::new(stops.iter().cloned())?;
    stroke_path_gradient(canvas, path, &gradient, options)
}

#[cfg(test)]
use crate::algorithms::sample::SamplingError;
#[cfg(test)]
use crate::canvas::RecordingCanvas;
#[cfg(test)]
use crate::color::Color;
#[cfg(test)]
use crate::error::InvalidConfiguration;
#[cfg(test)]
use crate::math::point;

#[cfg(test)]
fn line(length: f32) -> Path {
    let mut builder = Path::builder();
    builder.begin(point(0.0, 0.0));
    builder.line_to(point(length, 0.0));
    builder.end(false);
    builder.build()
}

#[test]
fn black_to_white_line() {
    let path = line(100.0);
    let gradient = Gradient::two_stops(Color::BLACK, Color::WHITE);
    let mut canvas = RecordingCanvas::new();

    let options = PathGradientOptions::DEFAULT
        .with_step(10.0)
        .with_line_width(2.0)
        .with_line_cap(LineCap::Square);
    stroke_path_gradient(&mut canvas, &path, &gradient, &options).unwrap();

    let segments = canvas.segments();
    assert_eq!(segments.len(), 10);
    for (i, segment) in segments.iter().enumerate() {
        let expected = (i + 1) as f32 / 10.0;
        assert!((segment.style.color.r - expected).abs() < 1e-5);
        assert!((segment.style.color.g - expected).abs() < 1e-5);
        assert!((segment.style.color.b - expected).abs() < 1e-5);
        assert_eq!(segment.style.line_width, 2.0);
        assert_eq!(segment.style.line_cap, LineCap::Square);
        assert_eq!(segment.style.line_join, LineJoin::Round);
        assert!((segment.from.x - i as f32 * 10.0).abs() < 1e-3);
    }

    assert_eq!(segments[9].to, point(100.0, 0.0));
    assert_eq!(segments[9].style.color, Color::WHITE);
}

#[test]
fn style_is_restored() {
    let path = line(10.0);
    let gradient = Gradient::two_stops(Color::RED, Color::GREEN);
    let mut canvas = RecordingCanvas::new();
    canvas.set_line_width(7.0);
    canvas.set_color(Color::BLUE);
    let before = *canvas.style();

    stroke_path_gradient(&mut canvas, &path, &gradient, &PathGradientOptions::DEFAULT).unwrap();

    assert!(!canvas.segments().is_empty());
    assert_eq!(*canvas.style(), before);
    assert_eq!(canvas.save_depth(), 0);

    // Same thing when an error is reported.
    let options = PathGradientOptions::DEFAULT.with_line_width(-1.0);
    assert!(stroke_path_gradient(&mut canvas, &path, &gradient, &options).is_err());
    assert_eq!(*canvas.style(), before);
    assert_eq!(canvas.save_depth(), 0);
}

#[test]
fn degenerate_paths() {
    let gradient = Gradient::two_stops(Color::BLACK, Color::WHITE);
    let mut canvas = RecordingCanvas::new();
    let mut stroker = PathGradientStroker::new();

    let mut builder = Path::builder();
    builder.begin(point(3.0, 3.0));
    builder.end(false);
    let point_path = builder.build();

    stroker
        .stroke(&mut canvas, &point_path, &gradient, &PathGradientOptions::DEFAULT)
        .unwrap();
    assert_eq!(stroker.samples().len(), 1);
    assert!(canvas.segments().is_empty());

    stroker
        .stroke(&mut canvas, &Path::new(), &gradient, &PathGradientOptions::DEFAULT)
        .unwrap();
    assert!(stroker.samples().is_empty());
    assert!(canvas.segments().is_empty());
    assert_eq!(canvas.save_depth(), 0);
}

#[test]
fn invalid_arguments() {
    let path = line(10.0);
    let gradient = Gradient::two_stops(Color::BLACK, Color::WHITE);
    let mut canvas = RecordingCanvas::new();

    for &width in &[0.0, -2.0, f32::NAN, f32::INFINITY] {
        let options = PathGradientOptions::DEFAULT.with_line_width(width);
        let result = stroke_path_gradient(&mut canvas, &path, &gradient, &options);
        assert!(matches!(
            result,
            Err(PathGradientError::InvalidArgument(InvalidArgument::LineWidth(_)))
        ));
    }

    let options = PathGradientOptions::DEFAULT.with_step(0.0);
    assert_eq!(
        stroke_path_gradient(&mut canvas, &path, &gradient, &options),
        Err(PathGradientError::InvalidArgument(InvalidArgument::Sampling(
            SamplingError::InvalidStep(0.0)
        )))
    );

    assert!(canvas.segments().is_empty());
}

#[test]
fn empty_stop_list() {
    let path = line(10.0);
    let mut canvas = RecordingCanvas::new();
    let result =
        stroke_path_gradient_stops(&mut canvas, &path, &[], &PathGradientOptions::DEFAULT);

    assert_eq!(
        result,
        Err(PathGradientError::InvalidConfiguration(
            InvalidConfiguration::NoStops
        ))
    );
    assert!(canvas.segments().is_empty());
}

#[test]
fn sub_paths_are_not_bridged() {
    let mut builder = Path::builder();
    builder.begin(point(0.0, 0.0));
    builder.line_to(point(10.0, 0.0));
    builder.end(false);
    builder.begin(point(0.0, 20.0));
    builder.line_to(point(10.0, 20.0));
    builder.end(false);
    let path = builder.build();

    let gradient = Gradient::two_stops(Color::BLACK, Color::WHITE);
    let mut canvas = RecordingCanvas::new();
    let options = PathGradientOptions::DEFAULT.with_step(2.5);
    stroke_path_gradient(&mut canvas, &path, &gradient, &options).unwrap();

    for segment in canvas.segments() {
        assert!((segment.from.y - segment.to.y).abs() < 1e-5);
    }
    // Samples at 0, 2.5, ... 17.5 and the end point: 9 samples, one pair bridges the gap.
    assert_eq!(canvas.segments().len(), 7);
}

#[test]
fn pixel_output_is_deterministic() {
    use crate::raster::PixelCanvas;
    use crate::path::builder::PathBuilder;

    let mut builder = Path::builder();
    builder.begin(point(5.0, 5.0));
    builder.cubic_bezier_to(point(60.0, 0.0), point(0.0, 60.0), point(55.0, 55.0));
    builder.end(false);
    builder.add_circle(point(30.0, 30.0), 12.0);
    let path = builder.build();

    let gradient = Gradient::new(vec![
        GradientStop::new(0.0, Color::RED),
        GradientStop::new(0.5, Color::rgba(0.0, 1.0, 0.0, 0.5)),
        GradientStop::new(1.0, Color::BLUE),
    ])
    .unwrap();
    let options = PathGradientOptions::DEFAULT
        .with_line_width(3.0)
        .with_line_cap(LineCap::Round)
        .with_step(0.7);

    let mut a = PixelCanvas::with_background(64, 64, Color::WHITE);
    let mut b = PixelCanvas::with_background(64, 64, Color::WHITE);
    stroke_path_gradient(&mut a, &path, &gradient, &options).unwrap();
    PathGradientStroker::new()
        .stroke(&mut b, &path, &gradient, &options)
        .unwrap();

    assert_eq!(a.data(), b.data());
    assert!(a.data().chunks_exact(4).any(|p| p != [255, 255, 255, 255]));
}
