//! Approximate path length.

use crate::path::PathEvent;

use std::iter::IntoIterator;

/// Computes the length of a path, approximating curves within `tolerance`.
///
/// The closing edge of closed sub-paths counts towards the length.
pub fn approximate_length<Iter>(path: Iter, tolerance: f32) -> f32
where
    Iter: IntoIterator<Item = PathEvent>,
{
    let tolerance = tolerance.max(1e-4);

    let mut length = 0.0;
    for evt in path.into_iter() {
        if let Some(segment) = evt.to_segment() {
            segment.for_each_flattened_with_t(tolerance, &mut |line, _| {
                length += line.length();
            });
        }
    }

    length
}

#[test]
fn approx_length() {
    use crate::math::point;

    let mut builder = crate::path::Path::builder();
    builder.begin(point(0.0, 0.0));
    builder.line_to(point(1.0, 0.0));
    builder.line_to(point(1.0, 1.0));
    builder.line_to(point(0.0, 1.0));
    builder.end(true);

    let path = builder.build();

    assert!((approximate_length(&path, 0.01) - 4.0).abs() < 0.0001);
}

#[test]
fn approx_length_of_open_sub_paths() {
    use crate::math::point;

    let mut builder = crate::path::Path::builder();
    builder.begin(point(0.0, 0.0));
    builder.line_to(point(3.0, 4.0));
    builder.end(false);
    builder.begin(point(10.0, 0.0));
    builder.quadratic_bezier_to(point(15.0, 0.0), point(20.0, 0.0));
    builder.end(false);

    let path = builder.build();

    assert!((approximate_length(&path, 0.01) - 15.0).abs() < 0.0001);
}
