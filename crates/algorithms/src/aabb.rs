//! Bounding rectangle computation for paths.

use crate::math::{point, Box2D, Point};
use crate::path::PathEvent;

/// Computes the smallest axis-aligned rectangle that contains the path.
///
/// Curves are bounded by their extrema rather than their control points.
/// Returns an empty rectangle at the origin if the path has no event.
pub fn bounding_box<Iter>(path: Iter) -> Box2D
where
    Iter: IntoIterator<Item = PathEvent>,
{
    let mut min = point(f32::MAX, f32::MAX);
    let mut max = point(f32::MIN, f32::MIN);

    for event in path {
        if let PathEvent::Begin { at } = event {
            include(&mut min, &mut max, at, at);
            continue;
        }

        if let Some(segment) = event.to_segment() {
            let aabb = segment.bounding_box();
            include(&mut min, &mut max, aabb.min, aabb.max);
        }
    }

    if min == point(f32::MAX, f32::MAX) {
        return Box2D::zero();
    }

    Box2D { min, max }
}

fn include(min: &mut Point, max: &mut Point, lower: Point, upper: Point) {
    *min = Point::min(*min, lower);
    *max = Point::max(*max, upper);
}

#[cfg(test)]
use crate::path::Path;

#[test]
fn simple_bounding_box() {
    let mut builder = Path::builder();
    builder.begin(point(-10.0, -3.0));
    builder.line_to(point(0.0, -12.0));
    builder.quadratic_bezier_to(point(3.0, 4.0), point(5.0, 3.0));
    builder.end(true);
    let path = builder.build();

    let aabb = bounding_box(&path);
    assert_eq!(aabb.min, point(-10.0, -12.0));
    assert_eq!(aabb.max.x, 5.0);
    // The curve bulges past its end point but not as far as its control point.
    assert!(aabb.max.y > 3.0 && aabb.max.y < 4.0);
}

#[test]
fn cubic_extrema() {
    let mut builder = Path::builder();
    builder.begin(point(0.0, 0.0));
    builder.cubic_bezier_to(point(0.0, 10.0), point(10.0, 10.0), point(10.0, 0.0));
    builder.end(false);
    let path = builder.build();

    let aabb = bounding_box(&path);
    assert_eq!(aabb.min, point(0.0, 0.0));
    assert!((aabb.max.y - 7.5).abs() < 1e-4);
    assert_eq!(aabb.max.x, 10.0);
}

#[test]
fn empty_bounding_box() {
    let path = Path::new();
    assert_eq!(bounding_box(&path), Box2D::zero());
}
