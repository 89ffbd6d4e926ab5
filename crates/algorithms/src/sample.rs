//! Sample a path at regular arc-length intervals.
//!
//! # Arc-length sampling
//!
//! Walking a path by arc length produces points that are evenly spaced along the
//! curve itself (as opposed to evenly spaced in curve parameter). Each sample is
//! associated with its normalized position along the path, the *fraction*: `0.0` at
//! the start of the path and `1.0` at its end.
//!
//! The sampling step is fixed. A path of length `L` sampled with a step `S` produces
//! `floor(L / S)` regular samples at distances `0, S, 2S, ...`, followed by one last
//! sample placed exactly on the end of the path with a fraction of exactly `1.0`. The
//! step is not adapted to the curvature, so short or tightly curved paths may be
//! under-sampled.
//!
//! Consecutive regular samples are `S` apart along the path. The last regular sample
//! sits at `(floor(L / S) - 1) * S`, so the gap before the end sample is at least `S`
//! and less than `2S`. For example a path of length 25 sampled every 10 units yields
//! samples at distances 0, 10 and 25. A path shorter than the step only gets the end
//! sample.
//!
//! At most [`MAX_SAMPLES`](constant.MAX_SAMPLES.html) regular samples are produced per path.
//! Longer paths (or smaller steps) fail with `SamplingError::TooManySamples`.
//!
//! ## Example
//!
//! ```
//! use sweep_algorithms::sample::sample_by_arc_length;
//! use sweep_algorithms::path::Path;
//! use sweep_algorithms::math::point;
//!
//! let mut builder = Path::builder();
//! builder.begin(point(0.0, 0.0));
//! builder.line_to(point(100.0, 0.0));
//! builder.end(false);
//! let path = builder.build();
//!
//! let samples = sample_by_arc_length(&path, 10.0, 0.01).unwrap();
//! assert_eq!(samples.len(), 11);
//! assert_eq!(samples.last().unwrap().fraction, 1.0);
//! ```

use crate::math::Point;
use crate::measure::PathMeasurements;
use crate::path::Path;

use thiserror::Error;

/// The default distance between two samples.
pub const DEFAULT_STEP: f32 = 0.1;

/// The default flattening tolerance used to measure curves.
pub const DEFAULT_TOLERANCE: f32 = 0.01;

/// Maximum number of regular samples produced for a single path.
pub const MAX_SAMPLES: usize = 1 << 24;

/// A point on the path along with its normalized arc-length position.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct ArcLengthSample {
    /// Position of the sample.
    pub position: Point,
    /// Distance from the start of the path divided by the length of the path.
    pub fraction: f32,
    /// Index of the sub-path the sample belongs to.
    pub sub_path: usize,
}

/// Invalid sampling parameters.
#[non_exhaustive]
#[derive(Error, Copy, Clone, Debug, PartialEq)]
pub enum SamplingError {
    #[error("The sampling step must be a positive finite number, got {0}.")]
    InvalidStep(f32),
    #[error("The flattening tolerance must be a positive number, got {0}.")]
    InvalidTolerance(f32),
    #[error("Sampling a path of length {length} every {step} units exceeds the maximum sample count.")]
    TooManySamples { length: f32, step: f32 },
}

/// Checks the sampling parameters without sampling anything.
pub fn validate(step: f32, tolerance: f32) -> Result<(), SamplingError> {
    if !(step > 0.0) || !step.is_finite() {
        return Err(SamplingError::InvalidStep(step));
    }

    if !(tolerance > 0.0) {
        return Err(SamplingError::InvalidTolerance(tolerance));
    }

    Ok(())
}

/// Number of regular samples (not counting the final one) for a path of a given length.
pub fn sample_count(length: f32, step: f32) -> usize {
    if !(length > 0.0) || !(step > 0.0) {
        return 0;
    }

    (length / step).floor() as usize
}

/// Samples a path at regular arc-length intervals.
///
/// See the [module documentation](index.html).
pub fn sample_by_arc_length(
    path: &Path,
    step: f32,
    tolerance: f32,
) -> Result<Vec<ArcLengthSample>, SamplingError> {
    let mut samples = Vec::new();
    sample_by_arc_length_into(path, step, tolerance, &mut samples)?;

    Ok(samples)
}

/// Same as `sample_by_arc_length`, writing the samples into an existing vector.
///
/// The vector is cleared first. On error it is left empty.
pub fn sample_by_arc_length_into(
    path: &Path,
    step: f32,
    tolerance: f32,
    output: &mut Vec<ArcLengthSample>,
) -> Result<(), SamplingError> {
    output.clear();
    validate(step, tolerance)?;

    let measurements = PathMeasurements::from_path(path, tolerance);
    sample_measurements(&measurements, step, output)
}

/// Samples a previously measured path, appending to `output`.
///
/// The step must be positive, see `validate`. Nothing is appended on error.
pub fn sample_measurements(
    measurements: &PathMeasurements,
    step: f32,
    output: &mut Vec<ArcLengthSample>,
) -> Result<(), SamplingError> {
    debug_assert!(step > 0.0);

    let end = match measurements.end_position() {
        Some(end) => end,
        None => return Ok(()),
    };

    let length = measurements.length();
    let count = sample_count(length, step);
    if count > MAX_SAMPLES {
        return Err(SamplingError::TooManySamples { length, step });
    }

    output.reserve(count + 1);

    let mut sampler = measurements.create_sampler();
    for i in 0..count {
        // Multiply instead of accumulating so that rounding errors don't add up.
        let distance = i as f32 * step;
        if let Some(sample) = sampler.sample(distance) {
            output.push(ArcLengthSample {
                position: sample.position(),
                fraction: distance / length,
                sub_path: sample.sub_path(),
            });
        }
    }

    let last_sub_path = sampler
        .sample(length)
        .map_or(0, |sample| sample.sub_path());

    output.push(ArcLengthSample {
        position: end,
        fraction: 1.0,
        sub_path: last_sub_path,
    });

    Ok(())
}

#[cfg(test)]
use crate::math::point;

#[cfg(test)]
fn horizontal_line(length: f32) -> Path {
    let mut builder = Path::builder();
    builder.begin(point(0.0, 0.0));
    builder.line_to(point(length, 0.0));
    builder.end(false);
    builder.build()
}

#[test]
fn sample_straight_line() {
    let path = horizontal_line(100.0);
    let samples = sample_by_arc_length(&path, 10.0, 0.01).unwrap();

    assert_eq!(samples.len(), 11);
    for (i, sample) in samples[..10].iter().enumerate() {
        let expected = i as f32 / 10.0;
        assert!((sample.fraction - expected).abs() < 1e-6);
        assert!((sample.position - point(i as f32 * 10.0, 0.0)).length() < 1e-4);
        assert_eq!(sample.sub_path, 0);
    }

    let last = samples[10];
    assert_eq!(last.fraction, 1.0);
    assert_eq!(last.position, point(100.0, 0.0));
}

#[test]
fn sample_count_is_floor() {
    for &(length, step, expected) in &[
        (100.0, 10.0, 10),
        (25.0, 10.0, 2),
        (5.0, 10.0, 0),
        (10.0, 3.0, 3),
        (1.0, 0.25, 4),
    ] {
        let path = horizontal_line(length);
        let samples = sample_by_arc_length(&path, step, 0.01).unwrap();
        assert_eq!(samples.len(), expected + 1, "length {} step {}", length, step);
        assert_eq!(sample_count(length, step), expected);

        let last = samples.last().unwrap();
        assert_eq!(last.fraction, 1.0);
        assert_eq!(last.position, point(length, 0.0));
    }
}

#[test]
fn last_gap_is_shorter_than_two_steps() {
    let path = horizontal_line(25.0);
    let samples = sample_by_arc_length(&path, 10.0, 0.01).unwrap();
    assert_positions(&samples, &[0.0, 10.0, 25.0]);
    assert!((samples[1].fraction - 0.4).abs() < 1e-6);
    assert_eq!(samples[2].fraction, 1.0);

    // An exact multiple of the step leaves a gap of exactly one step.
    let path = horizontal_line(30.0);
    let samples = sample_by_arc_length(&path, 10.0, 0.01).unwrap();
    assert_positions(&samples, &[0.0, 10.0, 20.0, 30.0]);
}

#[cfg(test)]
fn assert_positions(samples: &[ArcLengthSample], expected: &[f32]) {
    let positions: Vec<f32> = samples.iter().map(|s| s.position.x).collect();
    assert_eq!(positions.len(), expected.len(), "{:?}", positions);
    for (x, e) in positions.iter().zip(expected) {
        assert!((x - e).abs() < 1e-4, "{:?}", positions);
    }
    assert!(samples.iter().all(|s| s.position.y == 0.0));
}

#[test]
fn samples_are_ordered() {
    let mut builder = Path::builder();
    builder.begin(point(0.0, 0.0));
    builder.cubic_bezier_to(point(0.0, 40.0), point(60.0, -40.0), point(60.0, 0.0));
    builder.quadratic_bezier_to(point(80.0, 30.0), point(100.0, 0.0));
    builder.end(false);
    let path = builder.build();

    let step = 0.5;
    let samples = sample_by_arc_length(&path, step, 0.01).unwrap();
    assert!(samples.len() > 2);
    let last_pair = samples.len() - 2;
    for (i, pair) in samples.windows(2).enumerate() {
        assert!(pair[0].fraction <= pair[1].fraction);
        // Chords are never longer than the arc between the samples, give or take the
        // flattening tolerance. Only the gap before the end sample can exceed the step.
        let chord = (pair[1].position - pair[0].position).length();
        if i < last_pair {
            assert!(chord <= step + 0.05, "gap {} is {}", i, chord);
        } else {
            assert!(chord < 2.0 * step + 0.05, "last gap is {}", chord);
        }
    }

    let last = samples.last().unwrap();
    assert_eq!(last.fraction, 1.0);
    assert_eq!(last.position, point(100.0, 0.0));
}

#[test]
fn sample_closed_path_ends_at_start() {
    let mut builder = Path::builder();
    builder.begin(point(0.0, 0.0));
    builder.line_to(point(4.0, 0.0));
    builder.line_to(point(4.0, 3.0));
    builder.close();
    let path = builder.build();

    let samples = sample_by_arc_length(&path, 1.0, 0.01).unwrap();
    // 4 + 3 + 5 = 12 units long.
    assert_eq!(samples.len(), 13);
    assert_eq!(samples[12].position, point(0.0, 0.0));
    assert!((samples[6].position - point(4.0, 2.0)).length() < 1e-5);
}

#[test]
fn sample_zero_length_path() {
    let mut builder = Path::builder();
    builder.begin(point(7.0, 3.0));
    builder.end(false);
    let path = builder.build();

    let samples = sample_by_arc_length(&path, 0.1, 0.01).unwrap();
    assert_eq!(
        samples,
        vec![ArcLengthSample {
            position: point(7.0, 3.0),
            fraction: 1.0,
            sub_path: 0
        }]
    );

    // Degenerate edges don't add any length either.
    let mut builder = Path::builder();
    builder.begin(point(1.0, 1.0));
    builder.line_to(point(1.0, 1.0));
    builder.end(false);
    let samples = sample_by_arc_length(&builder.build(), 0.1, 0.01).unwrap();
    assert_eq!(samples.len(), 1);
    assert!(!samples[0].fraction.is_nan());
}

#[test]
fn sample_empty_path() {
    let samples = sample_by_arc_length(&Path::new(), 0.1, 0.01).unwrap();
    assert!(samples.is_empty());
}

#[test]
fn sample_sub_paths() {
    let mut builder = Path::builder();
    builder.begin(point(0.0, 0.0));
    builder.line_to(point(10.0, 0.0));
    builder.end(false);
    builder.begin(point(0.0, 10.0));
    builder.line_to(point(10.0, 10.0));
    builder.end(false);
    let path = builder.build();

    let samples = sample_by_arc_length(&path, 2.5, 0.01).unwrap();
    assert_eq!(samples.len(), 9);
    let sub_paths: Vec<usize> = samples.iter().map(|s| s.sub_path).collect();
    assert_eq!(sub_paths, vec![0, 0, 0, 0, 0, 1, 1, 1, 1]);
    assert_eq!(samples[8].position, point(10.0, 10.0));
}

#[test]
fn invalid_parameters() {
    let path = horizontal_line(10.0);
    let mut output = vec![ArcLengthSample {
        position: point(0.0, 0.0),
        fraction: 0.0,
        sub_path: 0,
    }];

    for &step in &[0.0, -1.0, f32::NAN, f32::INFINITY] {
        let result = sample_by_arc_length_into(&path, step, 0.01, &mut output);
        assert!(matches!(result, Err(SamplingError::InvalidStep(_))));
        assert!(output.is_empty());
    }

    assert_eq!(
        sample_by_arc_length(&path, 1.0, 0.0),
        Err(SamplingError::InvalidTolerance(0.0))
    );
}

#[test]
fn too_many_samples() {
    let path = horizontal_line(1.0e7);
    let mut output = Vec::new();
    let result = sample_by_arc_length_into(&path, 1.0e-3, 0.01, &mut output);
    assert!(matches!(result, Err(SamplingError::TooManySamples { .. })));
    assert!(output.is_empty());

    // Long paths below the limit are sampled as usual.
    let path = horizontal_line(1024.0);
    let samples = sample_by_arc_length(&path, 1.0 / 16.0, 0.01).unwrap();
    assert_eq!(samples.len(), 1024 * 16 + 1);
}
