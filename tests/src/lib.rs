//! Scenarios going through the whole stack: parsing, measuring, sampling and stroking.

use sweep::algorithms::length::approximate_length;
use sweep::algorithms::measure::PathMeasurements;
use sweep::algorithms::sample::{sample_by_arc_length, sample_count};
use sweep::extra::parser::parse_svg_path;
use sweep::math::{point, Point};
use sweep::paint::canvas::RecordedSegment;
use sweep::paint::stroke::{stroke_path_gradient, PathGradientOptions, PathGradientStroker};
use sweep::paint::{
    Canvas, Color, Gradient, GradientStop, LineCap, LineJoin, PixelCanvas, RecordingCanvas,
};
use sweep::path::Path;

static PATHS: [&str; 6] = [
    "M 0 0 L 100 0",
    "M 10 10 L 90 10 L 90 90 L 10 90 Z",
    "M 0 50 C 0 0 100 0 100 50 S 200 100 200 50",
    "M 0 0 Q 50 100 100 0 T 200 0",
    "M 0 0 h 20 v 20 h -20 z M 40 40 l 10 10 10 -10",
    "M 5 5 c 10 0 10 10 0 10 c -10 0 -10 -10 0 -10",
];

static STEPS: [f32; 4] = [0.1, 0.5, 3.0, 25.0];

/// Strokes a path onto a recording canvas and returns the segments.
pub fn record(path: &Path, gradient: &Gradient, options: &PathGradientOptions) -> Vec<RecordedSegment> {
    let mut canvas = RecordingCanvas::new();
    stroke_path_gradient(&mut canvas, path, gradient, options).unwrap();
    assert_eq!(canvas.save_depth(), 0);

    canvas.segments().to_vec()
}

fn assert_close(a: Point, b: Point, tolerance: f32) {
    assert!((a - b).length() <= tolerance, "{:?} != {:?}", a, b);
}

#[test]
fn straight_line_scenario() {
    let path = parse_svg_path("M 0 0 L 100 0").unwrap();

    let samples = sample_by_arc_length(&path, 10.0, 0.01).unwrap();
    assert_eq!(samples.len(), 11);
    for (i, sample) in samples[..10].iter().enumerate() {
        assert!((sample.fraction - i as f32 / 10.0).abs() < 1e-6);
        assert_close(sample.position, point(i as f32 * 10.0, 0.0), 1e-4);
    }
    assert_eq!(samples[10].fraction, 1.0);
    assert_eq!(samples[10].position, point(100.0, 0.0));

    let gradient = Gradient::two_stops(Color::BLACK, Color::WHITE);
    let segments = record(&path, &gradient, &PathGradientOptions::DEFAULT.with_step(10.0));
    assert_eq!(segments.len(), 10);

    // Colors go from black to white, each segment a bit lighter than the previous one.
    let mut prev = 0.0;
    for segment in &segments {
        let c = segment.style.color;
        assert!(c.r > prev);
        assert_eq!(c.r, c.g);
        assert_eq!(c.g, c.b);
        prev = c.r;
    }
    assert_eq!(segments.last().unwrap().style.color, Color::WHITE);
}

#[test]
fn zero_length_scenario() {
    for src in &["M 5 5", "M 5 5 L 5 5", "M 5 5 Z"] {
        let path = parse_svg_path(src).unwrap();
        let samples = sample_by_arc_length(&path, 0.1, 0.01).unwrap();
        assert_eq!(samples.len(), 1, "{}", src);
        assert_eq!(samples[0].fraction, 1.0);
        assert_eq!(samples[0].position, point(5.0, 5.0));

        let gradient = Gradient::two_stops(Color::BLACK, Color::WHITE);
        let segments = record(&path, &gradient, &PathGradientOptions::DEFAULT);
        assert!(segments.is_empty());
    }
}

#[test]
fn last_sample_is_the_end_point() {
    for src in &PATHS {
        let path = parse_svg_path(src).unwrap();
        let end = path.end_position().unwrap();

        for &step in &STEPS {
            let samples = sample_by_arc_length(&path, step, 0.01).unwrap();
            let last = samples.last().unwrap();
            assert_eq!(last.fraction, 1.0);
            assert_eq!(last.position, end);
        }
    }
}

#[test]
fn sample_counts_follow_the_length() {
    for src in &PATHS {
        let path = parse_svg_path(src).unwrap();
        let length = PathMeasurements::from_path(&path, 0.01).length();

        // Both ways of measuring agree.
        let approx = approximate_length(&path, 0.01);
        assert!((length - approx).abs() < 1e-3 * length.max(1.0), "{}: {} {}", src, length, approx);

        for &step in &STEPS {
            let samples = sample_by_arc_length(&path, step, 0.01).unwrap();
            assert_eq!(samples.len(), sample_count(length, step) + 1);

            for pair in samples.windows(2) {
                assert!(pair[0].fraction <= pair[1].fraction);
                assert!(pair[0].sub_path <= pair[1].sub_path);
            }
        }
    }
}

#[test]
fn segments_follow_the_samples() {
    let gradient = Gradient::new(vec![
        GradientStop::new(0.0, Color::RED),
        GradientStop::new(0.5, Color::GREEN),
        GradientStop::new(1.0, Color::BLUE),
    ])
    .unwrap();

    for src in &PATHS {
        let path = parse_svg_path(src).unwrap();
        let options = PathGradientOptions::DEFAULT.with_step(0.5);

        let mut stroker = PathGradientStroker::new();
        let mut canvas = RecordingCanvas::new();
        stroker.stroke(&mut canvas, &path, &gradient, &options).unwrap();

        let samples = stroker.samples();
        let mut segments = canvas.segments().iter();
        for pair in samples.windows(2) {
            if pair[0].sub_path != pair[1].sub_path {
                continue;
            }

            let segment = segments.next().unwrap();
            assert_eq!(segment.from, pair[0].position);
            assert_eq!(segment.to, pair[1].position);
            assert_eq!(segment.style.color, gradient.color_at(pair[1].fraction));
            assert_eq!(segment.style.line_join, LineJoin::Round);
        }
        assert!(segments.next().is_none());
    }
}

#[test]
fn multiple_sub_paths() {
    let path = parse_svg_path("M 0 0 h 20 v 20 h -20 z M 40 40 l 10 10 10 -10").unwrap();
    let gradient = Gradient::two_stops(Color::BLACK, Color::WHITE);
    let segments = record(&path, &gradient, &PathGradientOptions::DEFAULT.with_step(1.0));

    // No segment jumps from the square to the polyline. Only the segment reaching the
    // end of the path may be longer than a step.
    let (last, regular) = segments.split_last().unwrap();
    for segment in regular {
        assert!((segment.to - segment.from).length() <= 1.0 + 1e-3);
    }
    assert_eq!(last.to, point(60.0, 40.0));
    assert!((last.to - last.from).length() < 2.0 + 1e-3);

    // The gradient is spread over the total length of both sub-paths.
    let square_end = segments
        .iter()
        .filter(|s| s.to.x <= 20.0 && s.to.y <= 20.0)
        .last()
        .unwrap();
    let total = 80.0 + 2.0 * 200f32.sqrt();
    assert!((square_end.style.color.r - 80.0 / total).abs() < 0.02);
}

#[test]
fn canvas_style_is_preserved() {
    let path = parse_svg_path(PATHS[2]).unwrap();
    let gradient = Gradient::two_stops(Color::RED, Color::BLUE);
    let options = PathGradientOptions::DEFAULT
        .with_line_width(5.0)
        .with_line_cap(LineCap::Square);

    let mut canvas = PixelCanvas::new(220, 100);
    canvas.set_color(Color::GREEN);
    canvas.set_line_width(0.5);
    canvas.set_line_join(LineJoin::Bevel);
    let before = *canvas.style();

    stroke_path_gradient(&mut canvas, &path, &gradient, &options).unwrap();
    assert_eq!(*canvas.style(), before);

    let invalid = options.with_step(-1.0);
    assert!(stroke_path_gradient(&mut canvas, &path, &gradient, &invalid).is_err());
    assert_eq!(*canvas.style(), before);
}

#[test]
fn stroking_is_idempotent() {
    let gradient = Gradient::new(vec![
        GradientStop::new(0.0, Color::rgba(1.0, 0.0, 0.0, 0.8)),
        GradientStop::new(1.0, Color::rgba(0.0, 0.0, 1.0, 0.4)),
    ])
    .unwrap();

    for cap in &[LineCap::Butt, LineCap::Round, LineCap::Square] {
        let options = PathGradientOptions::DEFAULT
            .with_line_width(4.0)
            .with_line_cap(*cap)
            .with_step(1.5);

        for src in &PATHS {
            let path = parse_svg_path(src).unwrap();
            let mut a = PixelCanvas::with_background(220, 110, Color::WHITE);
            let mut b = PixelCanvas::with_background(220, 110, Color::WHITE);
            stroke_path_gradient(&mut a, &path, &gradient, &options).unwrap();
            stroke_path_gradient(&mut b, &path, &gradient, &options).unwrap();

            assert!(a.data() == b.data(), "{} {:?}", src, cap);
        }
    }
}

#[test]
fn rendered_colors_sweep_along_the_path() {
    // A U shape: both ends are at the same height, so a regular linear gradient along
    // the y axis would paint them with the same color.
    let path = parse_svg_path("M 10 10 L 10 90 L 90 90 L 90 10").unwrap();
    let gradient = Gradient::two_stops(Color::RED, Color::BLUE);
    let options = PathGradientOptions::DEFAULT.with_line_width(6.0).with_step(1.0);

    let mut canvas = PixelCanvas::with_background(100, 100, Color::WHITE);
    stroke_path_gradient(&mut canvas, &path, &gradient, &options).unwrap();

    let start = canvas.pixel(10, 12).unwrap();
    let end = canvas.pixel(90, 12).unwrap();
    assert!(start[0] > 200 && start[2] < 50, "{:?}", start);
    assert!(end[2] > 200 && end[0] < 50, "{:?}", end);
}
