//! Straight (non-premultiplied) RGBA colors.

use crate::error::ColorParseError;

use std::fmt;

/// A color with floating point red, green, blue and alpha channels.
///
/// Channels are expected to be in the `[0, 1]` range. Alpha is not premultiplied.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Self = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Color::rgb(1.0, 1.0, 1.0);
    pub const RED: Self = Color::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Self = Color::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Self = Color::rgb(0.0, 0.0, 1.0);
    pub const TRANSPARENT: Self = Color::rgba(0.0, 0.0, 0.0, 0.0);

    /// An opaque color.
    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Color { r, g, b, a: 1.0 }
    }

    #[inline]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Color { r, g, b, a }
    }

    /// Linear interpolation of all four channels.
    ///
    /// `t = 0.0` returns `self` and `t = 1.0` returns `other`.
    #[inline]
    pub fn lerp(&self, other: Color, t: f32) -> Color {
        let one_t = 1.0 - t;
        Color {
            r: self.r * one_t + other.r * t,
            g: self.g * one_t + other.g * t,
            b: self.b * one_t + other.b * t,
            a: self.a * one_t + other.a * t,
        }
    }

    /// Converts to 8 bits per channel, clamping out of range values.
    pub fn to_rgba8(&self) -> [u8; 4] {
        [
            channel_to_u8(self.r),
            channel_to_u8(self.g),
            channel_to_u8(self.b),
            channel_to_u8(self.a),
        ]
    }

    pub fn from_rgba8(rgba: [u8; 4]) -> Self {
        Color {
            r: rgba[0] as f32 / 255.0,
            g: rgba[1] as f32 / 255.0,
            b: rgba[2] as f32 / 255.0,
            a: rgba[3] as f32 / 255.0,
        }
    }

    /// Parses `#rrggbb` or `#rrggbbaa` hexadecimal notation. The `#` is optional.
    pub fn from_hex(src: &str) -> Result<Self, ColorParseError> {
        let digits = src.trim();
        let digits = digits.strip_prefix('#').unwrap_or(digits);

        if digits.len() != 6 && digits.len() != 8 {
            return Err(ColorParseError::Length {
                src: src.to_string(),
            });
        }

        // `from_str_radix` would accept a sign.
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorParseError::Digit {
                src: src.to_string(),
            });
        }

        let mut rgba = [255; 4];
        for (i, channel) in rgba.iter_mut().enumerate().take(digits.len() / 2) {
            let byte = digits
                .get(i * 2..i * 2 + 2)
                .and_then(|hex| u8::from_str_radix(hex, 16).ok());
            *channel = byte.ok_or_else(|| ColorParseError::Digit {
                src: src.to_string(),
            })?;
        }

        Ok(Color::from_rgba8(rgba))
    }

    /// Returns true if all channels are within `[0, 1]`.
    pub fn is_normalized(&self) -> bool {
        let ok = |c: f32| (0.0..=1.0).contains(&c);
        ok(self.r) && ok(self.g) && ok(self.b) && ok(self.a)
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl fmt::Display for Color {
    /// Formats as `#rrggbbaa`.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let [r, g, b, a] = self.to_rgba8();
        write!(f, "#{:02x}{:02x}{:02x}{:02x}", r, g, b, a)
    }
}

impl std::str::FromStr for Color {
    type Err = ColorParseError;

    fn from_str(src: &str) -> Result<Self, ColorParseError> {
        Color::from_hex(src)
    }
}

fn channel_to_u8(c: f32) -> u8 {
    // NaN maps to zero.
    let c = if c.is_nan() { 0.0 } else { c.max(0.0).min(1.0) };
    (c * 255.0).round() as u8
}

#[test]
fn lerp_black_white() {
    let mid = Color::BLACK.lerp(Color::WHITE, 0.5);
    assert_eq!(mid, Color::rgb(0.5, 0.5, 0.5));
    assert_eq!(Color::BLACK.lerp(Color::WHITE, 0.0), Color::BLACK);
    assert_eq!(Color::BLACK.lerp(Color::WHITE, 1.0), Color::WHITE);

    let faded = Color::RED.lerp(Color::TRANSPARENT, 0.25);
    assert_eq!(faded, Color::rgba(0.75, 0.0, 0.0, 0.75));
}

#[test]
fn rgba8_conversions() {
    assert_eq!(Color::WHITE.to_rgba8(), [255, 255, 255, 255]);
    assert_eq!(Color::rgba(0.5, -1.0, 2.0, f32::NAN).to_rgba8(), [128, 0, 255, 0]);
    assert_eq!(Color::from_rgba8([0, 255, 0, 255]), Color::GREEN);
}

#[test]
fn parse_hex() {
    assert_eq!(Color::from_hex("#ff0000"), Ok(Color::RED));
    assert_eq!(Color::from_hex("0000ff"), Ok(Color::BLUE));
    assert_eq!(
        Color::from_hex("#00000000").map(|c| c.to_rgba8()),
        Ok([0, 0, 0, 0])
    );
    assert_eq!("#ffffff".parse::<Color>(), Ok(Color::WHITE));

    assert!(matches!(
        Color::from_hex("#fff"),
        Err(ColorParseError::Length { .. })
    ));
    assert!(matches!(
        Color::from_hex("#gg0000"),
        Err(ColorParseError::Digit { .. })
    ));
    // Multi-byte characters must not cause a panic when slicing.
    assert!(Color::from_hex("#ééé").is_err());
}

#[test]
fn parse_hex_rejects_signs() {
    for src in &["#+f+f+f", "+f+f+f+f", "#-1ffff"] {
        assert!(
            matches!(Color::from_hex(src), Err(ColorParseError::Digit { .. })),
            "{}",
            src
        );
    }
}

#[test]
fn display_hex() {
    assert_eq!(format!("{}", Color::RED), "#ff0000ff");
    let c = Color::from_hex("#12ab34cd").unwrap();
    assert_eq!(format!("{}", c), "#12ab34cd");
}
