//! A small software rasterizer for stroked line segments.
//!
//! Each `stroke_line` call is rasterized independently: the coverage of a pixel is
//! derived from the signed distance between the pixel center and the stroke shape
//! (a rectangle for butt and square caps, a capsule for round caps), which gives about
//! one pixel of anti-aliasing. The color is then blended over the existing pixels with
//! the source-over operator.
//!
//! Rasterization doesn't depend on any global state so drawing the same segments onto
//! two identical canvases produces identical pixels.

use crate::canvas::{Canvas, LineCap, StrokeStyle, StyleStack};
use crate::color::Color;
use crate::error::InvalidArgument;
use crate::math::{point, vector, Point, Vector};

use std::io;

/// An RGBA8 pixel buffer implementing `Canvas`.
#[derive(Clone, Debug)]
pub struct PixelCanvas {
    width: u32,
    height: u32,
    // Straight alpha, row-major, 4 bytes per pixel.
    pixels: Vec<u8>,
    styles: StyleStack,
}

impl PixelCanvas {
    /// Creates a transparent canvas.
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_background(width, height, Color::TRANSPARENT)
    }

    /// Creates a canvas filled with a color.
    ///
    /// # Panics
    ///
    /// If the size of the pixel buffer in bytes does not fit in a `usize`. See
    /// `try_with_background`.
    pub fn with_background(width: u32, height: u32, background: Color) -> Self {
        match Self::try_with_background(width, height, background) {
            Ok(canvas) => canvas,
            Err(error) => panic!("{}", error),
        }
    }

    /// Creates a canvas filled with a color, failing if the size of the pixel buffer in
    /// bytes does not fit in a `usize`.
    pub fn try_with_background(
        width: u32,
        height: u32,
        background: Color,
    ) -> Result<Self, InvalidArgument> {
        let len = (width as usize)
            .checked_mul(height as usize)
            .filter(|len| len.checked_mul(4).is_some())
            .ok_or(InvalidArgument::CanvasSize { width, height })?;

        let mut pixels = Vec::with_capacity(len * 4);
        let rgba = background.to_rgba8();
        for _ in 0..len {
            pixels.extend_from_slice(&rgba);
        }

        Ok(PixelCanvas {
            width,
            height,
            pixels,
            styles: StyleStack::new(),
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The raw RGBA8 data, row by row.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.pixels
    }

    /// Returns the pixel at the given coordinates, or `None` if they are out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }

        let offset = self.offset(x, y);
        let mut rgba = [0; 4];
        rgba.copy_from_slice(&self.pixels[offset..offset + 4]);

        Some(rgba)
    }

    /// Fills the whole canvas with a color, ignoring the style.
    pub fn clear(&mut self, color: Color) {
        let rgba = color.to_rgba8();
        for pixel in self.pixels.chunks_exact_mut(4) {
            pixel.copy_from_slice(&rgba);
        }
    }

    /// Writes the canvas as a binary PPM (P6) image.
    ///
    /// PPM has no alpha channel: pixels are composited over black.
    pub fn write_ppm<W: io::Write>(&self, output: &mut W) -> io::Result<()> {
        write!(output, "P6\n{} {}\n255\n", self.width, self.height)?;

        let mut row = Vec::with_capacity(self.width as usize * 3);
        for line in self.pixels.chunks_exact(self.width.max(1) as usize * 4) {
            row.clear();
            for pixel in line.chunks_exact(4) {
                let alpha = pixel[3] as u32;
                for &channel in &pixel[..3] {
                    row.push(((channel as u32 * alpha + 127) / 255) as u8);
                }
            }
            output.write_all(&row)?;
        }

        Ok(())
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    fn blend(&mut self, x: u32, y: u32, color: &Color, coverage: f32) {
        let src_a = color.a * coverage;
        if !(src_a > 0.0) {
            return;
        }

        let offset = self.offset(x, y);
        let dst = Color::from_rgba8([
            self.pixels[offset],
            self.pixels[offset + 1],
            self.pixels[offset + 2],
            self.pixels[offset + 3],
        ]);

        let inv = dst.a * (1.0 - src_a);
        let out_a = src_a + inv;
        let mix = |s: f32, d: f32| (s * src_a + d * inv) / out_a;
        let out = Color::rgba(mix(color.r, dst.r), mix(color.g, dst.g), mix(color.b, dst.b), out_a);

        self.pixels[offset..offset + 4].copy_from_slice(&out.to_rgba8());
    }
}

impl Canvas for PixelCanvas {
    fn style(&self) -> &StrokeStyle {
        self.styles.current()
    }

    fn style_mut(&mut self) -> &mut StrokeStyle {
        self.styles.current_mut()
    }

    fn save(&mut self) {
        self.styles.save();
    }

    fn restore(&mut self) {
        self.styles.restore();
    }

    fn stroke_line(&mut self, from: Point, to: Point) {
        let style = *self.styles.current();
        let half_width = style.line_width * 0.5;
        if !(half_width > 0.0) || !half_width.is_finite() || self.width == 0 || self.height == 0 {
            return;
        }

        let shape = match StrokeShape::new(from, to, half_width, style.line_cap) {
            Some(shape) => shape,
            None => return,
        };

        // Pixels whose center is further than half a pixel from the shape are not touched.
        let margin = half_width * std::f32::consts::SQRT_2 + 1.0;
        let min = Point::min(from, to) - vector(margin, margin);
        let max = Point::max(from, to) + vector(margin, margin);
        if !(min.x < self.width as f32 && min.y < self.height as f32 && max.x > 0.0 && max.y > 0.0)
        {
            return;
        }

        let x0 = min.x.max(0.0).floor() as u32;
        let y0 = min.y.max(0.0).floor() as u32;
        let x1 = (max.x.ceil() as u32).min(self.width);
        let y1 = (max.y.ceil() as u32).min(self.height);

        for y in y0..y1 {
            for x in x0..x1 {
                let center = point(x as f32 + 0.5, y as f32 + 0.5);
                let coverage = (0.5 - shape.signed_distance(center)).max(0.0).min(1.0);
                if coverage > 0.0 {
                    self.blend(x, y, &style.color, coverage);
                }
            }
        }
    }
}

/// The area covered by a stroked segment.
enum StrokeShape {
    // Oriented rectangle spanning `start..end` along `direction`.
    Rect {
        origin: Point,
        direction: Vector,
        start: f32,
        end: f32,
        half_width: f32,
    },
    Capsule {
        from: Point,
        to: Point,
        half_width: f32,
    },
}

impl StrokeShape {
    fn new(from: Point, to: Point, half_width: f32, cap: LineCap) -> Option<Self> {
        let chord = to - from;
        let length = chord.length();
        let degenerate = !(length > 1e-6);

        match cap {
            LineCap::Round => Some(StrokeShape::Capsule {
                from,
                to,
                half_width,
            }),
            // Zero length segments have no stroke with butt caps.
            LineCap::Butt if degenerate => None,
            LineCap::Butt => Some(StrokeShape::Rect {
                origin: from,
                direction: chord / length,
                start: 0.0,
                end: length,
                half_width,
            }),
            LineCap::Square => {
                // A zero length segment with square caps is an axis-aligned square.
                let (direction, length) = if degenerate {
                    (vector(1.0, 0.0), 0.0)
                } else {
                    (chord / length, length)
                };

                Some(StrokeShape::Rect {
                    origin: from,
                    direction,
                    start: -half_width,
                    end: length + half_width,
                    half_width,
                })
            }
        }
    }

    // Negative inside, positive outside.
    fn signed_distance(&self, p: Point) -> f32 {
        match *self {
            StrokeShape::Rect {
                origin,
                direction,
                start,
                end,
                half_width,
            } => {
                let d = p - origin;
                let along = d.dot(direction);
                let across = d.cross(direction).abs();
                let du = (start - along).max(along - end);
                let dv = across - half_width;
                if du > 0.0 && dv > 0.0 {
                    vector(du, dv).length()
                } else {
                    du.max(dv)
                }
            }
            StrokeShape::Capsule {
                from,
                to,
                half_width,
            } => {
                let chord = to - from;
                let square_length = chord.square_length();
                let t = if square_length > 0.0 {
                    ((p - from).dot(chord) / square_length).max(0.0).min(1.0)
                } else {
                    0.0
                };
                (p - (from + chord * t)).length() - half_width
            }
        }
    }
}

#[test]
fn butt_cap_horizontal_line() {
    let mut canvas = PixelCanvas::with_background(20, 10, Color::WHITE);
    canvas.set_color(Color::BLACK);
    canvas.set_line_width(2.0);
    canvas.stroke_line(point(5.0, 5.0), point(15.0, 5.0));

    // Fully covered pixels inside the stroke.
    assert_eq!(canvas.pixel(10, 4), Some([0, 0, 0, 255]));
    assert_eq!(canvas.pixel(10, 5), Some([0, 0, 0, 255]));
    // Outside of the stroke, vertically and past the butt caps.
    assert_eq!(canvas.pixel(10, 7), Some([255, 255, 255, 255]));
    assert_eq!(canvas.pixel(16, 5), Some([255, 255, 255, 255]));
    assert_eq!(canvas.pixel(3, 5), Some([255, 255, 255, 255]));
}

#[test]
fn caps_extend_the_stroke() {
    let stroke = |cap: LineCap| {
        let mut canvas = PixelCanvas::new(30, 10);
        canvas.set_line_width(4.0);
        canvas.set_line_cap(cap);
        canvas.stroke_line(point(10.0, 5.0), point(20.0, 5.0));
        canvas
    };

    let butt = stroke(LineCap::Butt);
    let square = stroke(LineCap::Square);
    let round = stroke(LineCap::Round);

    // Pixel (9, 4) has its center at (9.5, 4.5), half a unit before the start of the segment.
    assert_eq!(butt.pixel(9, 4).map(|p| p[3]), Some(0));
    assert_eq!(square.pixel(9, 4).map(|p| p[3]), Some(255));
    assert_eq!(round.pixel(9, 4).map(|p| p[3]), Some(255));

    // (8.5, 3.5) is inside the corner of the square cap, on the edge of the round one.
    assert_eq!(square.pixel(8, 3).map(|p| p[3]), Some(255));
    let alpha = round.pixel(8, 3).map(|p| p[3]).unwrap();
    assert!(alpha > 0 && alpha < 128, "alpha {}", alpha);
}

#[test]
fn zero_length_segments() {
    let stroke = |cap: LineCap| {
        let mut canvas = PixelCanvas::new(10, 10);
        canvas.set_line_width(4.0);
        canvas.set_line_cap(cap);
        canvas.stroke_line(point(5.0, 5.0), point(5.0, 5.0));
        canvas
    };

    assert!(stroke(LineCap::Butt).data().iter().all(|&b| b == 0));
    assert_eq!(stroke(LineCap::Square).pixel(4, 4).map(|p| p[3]), Some(255));
    assert_eq!(stroke(LineCap::Round).pixel(5, 5).map(|p| p[3]), Some(255));
}

#[test]
fn antialiased_edges() {
    let mut canvas = PixelCanvas::new(10, 10);
    canvas.set_line_width(1.0);
    // The stroke covers y in [4.25, 5.25], so pixel row 5 is partially covered.
    canvas.stroke_line(point(0.0, 4.75), point(10.0, 4.75));

    let alpha = canvas.pixel(5, 5).map(|p| p[3]).unwrap();
    assert!(alpha > 0 && alpha < 255, "alpha {}", alpha);
}

#[test]
fn out_of_bounds_strokes() {
    let mut canvas = PixelCanvas::new(10, 10);
    canvas.set_line_width(3.0);
    canvas.stroke_line(point(-50.0, -50.0), point(-40.0, -40.0));
    canvas.stroke_line(point(100.0, 5.0), point(200.0, 5.0));
    assert!(canvas.data().iter().all(|&b| b == 0));

    canvas.stroke_line(point(-100.0, 5.0), point(100.0, 5.0));
    assert_eq!(canvas.pixel(0, 5).map(|p| p[3]), Some(255));
    assert_eq!(canvas.pixel(9, 5).map(|p| p[3]), Some(255));
    assert_eq!(canvas.pixel(10, 5), None);
}

#[test]
fn source_over_blending() {
    let mut canvas = PixelCanvas::with_background(4, 4, Color::BLUE);
    canvas.set_color(Color::rgba(1.0, 0.0, 0.0, 0.5));
    canvas.set_line_width(10.0);
    canvas.stroke_line(point(0.0, 2.0), point(4.0, 2.0));

    assert_eq!(canvas.pixel(1, 1), Some([128, 0, 128, 255]));
}

#[test]
fn ppm_output() {
    let mut canvas = PixelCanvas::with_background(2, 1, Color::WHITE);
    canvas.set_color(Color::RED);
    canvas.set_line_width(2.0);
    canvas.stroke_line(point(0.0, 0.5), point(1.0, 0.5));

    let mut bytes = Vec::new();
    canvas.write_ppm(&mut bytes).unwrap();

    let header = b"P6\n2 1\n255\n";
    assert_eq!(&bytes[..header.len()], &header[..]);
    assert_eq!(&bytes[header.len()..], &[255, 0, 0, 255, 255, 255][..]);
}

#[test]
fn canvas_size_overflow() {
    assert_eq!(
        PixelCanvas::try_with_background(u32::MAX, u32::MAX, Color::BLACK).err(),
        Some(InvalidArgument::CanvasSize {
            width: u32::MAX,
            height: u32::MAX,
        })
    );

    let canvas = PixelCanvas::try_with_background(3, 2, Color::RED).unwrap();
    assert_eq!(canvas.data().len(), 3 * 2 * 4);
    assert_eq!(canvas.pixel(2, 1), Some([255, 0, 0, 255]));
}
