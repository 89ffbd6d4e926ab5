//! Piecewise-linear color ramps.
//!
//! A [Gradient](struct.Gradient.html) is a sorted table of color stops. Querying it at a
//! fraction between two stops linearly interpolates their colors. Queries before the
//! first stop or after the last one return the color of that boundary stop.
//!
//! ```
//! use sweep_paint::gradient::{Gradient, GradientStop};
//! use sweep_paint::color::Color;
//!
//! let gradient = Gradient::new(vec![
//!     GradientStop::new(0.0, Color::RED),
//!     GradientStop::new(1.0, Color::BLUE),
//! ]).unwrap();
//!
//! assert_eq!(gradient.color_at(0.5), Color::rgb(0.5, 0.0, 0.5));
//! assert_eq!(gradient.color_at(-3.0), Color::RED);
//! ```

use crate::color::Color;
use crate::error::InvalidConfiguration;

/// A color at a given offset of a gradient.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct GradientStop {
    pub offset: f32,
    pub color: Color,
}

impl GradientStop {
    #[inline]
    pub const fn new(offset: f32, color: Color) -> Self {
        GradientStop { offset, color }
    }
}

/// A validated, sorted sequence of gradient stops.
#[derive(Clone, Debug, PartialEq)]
pub struct Gradient {
    stops: Vec<GradientStop>,
}

impl Gradient {
    /// Builds a gradient from a sequence of stops.
    ///
    /// Offsets are clamped to `[0, 1]` and the stops are sorted by offset. Stops that
    /// share an offset keep their relative order, which allows hard transitions.
    ///
    /// Fails with `InvalidConfiguration::NoStops` if the sequence is empty and with
    /// `InvalidConfiguration::OffsetIsNaN` if an offset is not a number.
    pub fn new<Stops>(stops: Stops) -> Result<Self, InvalidConfiguration>
    where
        Stops: IntoIterator<Item = GradientStop>,
    {
        let mut sorted = Vec::new();
        for (index, stop) in stops.into_iter().enumerate() {
            if stop.offset.is_nan() {
                return Err(InvalidConfiguration::OffsetIsNaN { index });
            }

            sorted.push(GradientStop {
                offset: stop.offset.max(0.0).min(1.0),
                color: stop.color,
            });
        }

        if sorted.is_empty() {
            return Err(InvalidConfiguration::NoStops);
        }

        // Stable sort. NaN offsets were rejected above.
        sorted.sort_by(|a, b| a.offset.total_cmp(&b.offset));

        Ok(Gradient { stops: sorted })
    }

    /// A gradient from `start` at offset `0.0` to `end` at offset `1.0`.
    pub fn two_stops(start: Color, end: Color) -> Self {
        Gradient {
            stops: vec![GradientStop::new(0.0, start), GradientStop::new(1.0, end)],
        }
    }

    /// A gradient with a single color.
    pub fn solid(color: Color) -> Self {
        Gradient {
            stops: vec![GradientStop::new(0.0, color)],
        }
    }

    /// The stops, sorted by offset.
    #[inline]
    pub fn stops(&self) -> &[GradientStop] {
        &self.stops
    }

    /// Returns the interpolated color at a given fraction.
    ///
    /// - Fractions before the first stop (including anything below `0.0`) return the
    ///   color of the first stop, fractions after the last stop return the color of the
    ///   last stop. NaN is treated as being before the first stop.
    /// - A fraction equal to the offset of a stop returns the color of that stop exactly.
    ///   If several stops share the offset, the last of them wins.
    pub fn color_at(&self, fraction: f32) -> Color {
        let stops = &self.stops[..];
        let first = stops[0];
        if fraction.is_nan() {
            return first.color;
        }

        // Number of stops at or before the fraction.
        let idx = stops.partition_point(|stop| stop.offset <= fraction);
        if idx == 0 {
            return first.color;
        }

        let lower = stops[idx - 1];
        if idx == stops.len() || lower.offset == fraction {
            return lower.color;
        }

        let upper = stops[idx];
        // lower.offset < fraction < upper.offset, so the span is not empty.
        let t = (fraction - lower.offset) / (upper.offset - lower.offset);

        lower.color.lerp(upper.color, t)
    }
}

#[cfg(test)]
fn stops(offsets_and_colors: &[(f32, Color)]) -> Vec<GradientStop> {
    offsets_and_colors
        .iter()
        .map(|&(offset, color)| GradientStop::new(offset, color))
        .collect()
}

#[test]
fn empty_gradient() {
    assert_eq!(
        Gradient::new(Vec::new()),
        Err(InvalidConfiguration::NoStops)
    );
}

#[test]
fn nan_offset() {
    let result = Gradient::new(stops(&[(0.0, Color::RED), (f32::NAN, Color::BLUE)]));
    assert_eq!(result, Err(InvalidConfiguration::OffsetIsNaN { index: 1 }));
}

#[test]
fn two_stop_interpolation() {
    let gradient = Gradient::two_stops(Color::BLACK, Color::WHITE);

    for i in 0..=10 {
        let f = i as f32 / 10.0;
        let c = gradient.color_at(f);
        assert!((c.r - f).abs() < 1e-6);
        assert!((c.g - f).abs() < 1e-6);
        assert!((c.b - f).abs() < 1e-6);
        assert_eq!(c.a, 1.0);
    }
}

#[test]
fn clamp_outside_of_range() {
    let gradient = Gradient::new(stops(&[(0.2, Color::RED), (0.8, Color::BLUE)])).unwrap();

    assert_eq!(gradient.color_at(-1.0), Color::RED);
    assert_eq!(gradient.color_at(0.0), Color::RED);
    assert_eq!(gradient.color_at(0.1), Color::RED);
    assert_eq!(gradient.color_at(0.9), Color::BLUE);
    assert_eq!(gradient.color_at(1.0), Color::BLUE);
    assert_eq!(gradient.color_at(42.0), Color::BLUE);
    assert_eq!(gradient.color_at(f32::INFINITY), Color::BLUE);
    assert_eq!(gradient.color_at(f32::NEG_INFINITY), Color::RED);
    assert_eq!(gradient.color_at(f32::NAN), Color::RED);
}

#[test]
fn exact_stop_colors() {
    let odd = Color::rgba(0.3, 0.7, 0.1, 0.9);
    let gradient = Gradient::new(stops(&[
        (0.0, Color::BLACK),
        (0.3, odd),
        (0.6, Color::GREEN),
        (1.0, Color::WHITE),
    ]))
    .unwrap();

    assert_eq!(gradient.color_at(0.0), Color::BLACK);
    assert_eq!(gradient.color_at(0.3), odd);
    assert_eq!(gradient.color_at(0.6), Color::GREEN);
    assert_eq!(gradient.color_at(1.0), Color::WHITE);
}

#[test]
fn single_stop() {
    let gradient = Gradient::new(stops(&[(0.5, Color::GREEN)])).unwrap();
    for &f in &[-1.0, 0.0, 0.25, 0.5, 0.75, 1.0, 2.0] {
        assert_eq!(gradient.color_at(f), Color::GREEN);
    }

    assert_eq!(Gradient::solid(Color::RED).color_at(0.7), Color::RED);
}

#[test]
fn unsorted_and_clamped_stops() {
    let gradient = Gradient::new(stops(&[
        (2.0, Color::WHITE),
        (0.5, Color::RED),
        (-1.0, Color::BLACK),
    ]))
    .unwrap();

    let offsets: Vec<f32> = gradient.stops().iter().map(|s| s.offset).collect();
    assert_eq!(offsets, vec![0.0, 0.5, 1.0]);
    assert_eq!(gradient.color_at(0.25), Color::rgb(0.5, 0.0, 0.0));
}

#[test]
fn hard_transition() {
    let gradient = Gradient::new(stops(&[
        (0.0, Color::RED),
        (0.5, Color::RED),
        (0.5, Color::BLUE),
        (1.0, Color::BLUE),
    ]))
    .unwrap();

    assert_eq!(gradient.color_at(0.25), Color::RED);
    assert_eq!(gradient.color_at(0.5), Color::BLUE);
    assert_eq!(gradient.color_at(0.75), Color::BLUE);
}
