extern crate sweep;
#[macro_use]
extern crate bencher;

use sweep::algorithms::measure::PathMeasurements;
use sweep::algorithms::sample::sample_by_arc_length;
use sweep::math::point;
use sweep::paint::stroke::{PathGradientOptions, PathGradientStroker};
use sweep::paint::{Color, Gradient, PixelCanvas, RecordingCanvas};
use sweep::path::Path;

use bencher::Bencher;

const N: usize = 100;

fn wavy_path() -> Path {
    let mut path = Path::builder();
    path.begin(point(0.0, 0.0));
    for i in 0..N {
        let x = i as f32 * 10.0;
        path.cubic_bezier_to(point(x + 2.0, 20.0), point(x + 8.0, -20.0), point(x + 10.0, 0.0));
        path.quadratic_bezier_to(point(x + 15.0, 10.0), point(x + 10.0, 5.0));
        path.line_to(point(x + 10.0, 0.0));
    }
    path.end(false);
    path.build()
}

fn measure(bench: &mut Bencher) {
    let path = wavy_path();
    bench.iter(|| {
        let measurements = PathMeasurements::from_path(&path, 0.01);
        bencher::black_box(measurements.length());
    });
}

fn sample(bench: &mut Bencher) {
    let path = wavy_path();
    bench.iter(|| {
        let samples = sample_by_arc_length(&path, 0.1, 0.01).unwrap();
        bencher::black_box(samples.len());
    });
}

fn stroke_recording(bench: &mut Bencher) {
    let path = wavy_path();
    let gradient = Gradient::two_stops(Color::RED, Color::BLUE);
    let options = PathGradientOptions::DEFAULT;
    let mut stroker = PathGradientStroker::new();
    let mut canvas = RecordingCanvas::new();

    bench.iter(|| {
        canvas.clear();
        stroker
            .stroke(&mut canvas, &path, &gradient, &options)
            .unwrap();
    });
}

fn stroke_pixels(bench: &mut Bencher) {
    let path = wavy_path();
    let gradient = Gradient::two_stops(Color::RED, Color::BLUE);
    let options = PathGradientOptions::DEFAULT
        .with_line_width(3.0)
        .with_step(0.5);
    let mut stroker = PathGradientStroker::new();

    bench.iter(|| {
        let mut canvas = PixelCanvas::new(1024, 64);
        stroker
            .stroke(&mut canvas, &path, &gradient, &options)
            .unwrap();
        bencher::black_box(canvas.data().len());
    });
}

benchmark_group!(sampling, measure, sample);

benchmark_group!(stroking, stroke_recording, stroke_pixels);

benchmark_main!(sampling, stroking);
