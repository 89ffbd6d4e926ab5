#![deny(bare_trait_objects)]
#![allow(clippy::float_cmp)]

//! Stroke paths with a gradient that follows their arc length.
//!
//! This crate is reexported in [sweep](https://docs.rs/sweep/).
//!
//! # Overview
//!
//! A regular linear gradient varies along a fixed axis, regardless of the shape it is
//! applied to. The gradient strokes produced here instead sweep the gradient along the
//! path itself: the start of the path gets the color at offset `0.0` and the end of the
//! path the color at offset `1.0`, however the path winds in between.
//!
//! The path is sampled at regular arc-length intervals (see
//! [sweep_algorithms::sample](https://docs.rs/sweep_algorithms/*/sweep_algorithms/sample/index.html)),
//! and each pair of consecutive samples is stroked as a short line segment with the
//! gradient color at that position.
//!
//! The drawing itself goes through the [Canvas](canvas/trait.Canvas.html) trait. This
//! crate provides a [RecordingCanvas](canvas/struct.RecordingCanvas.html) that records
//! the stroked segments and a simple software rasterizer, the
//! [PixelCanvas](raster/struct.PixelCanvas.html).
//!
//! # Example
//!
//! ```
//! use sweep_paint::{
//!     color::Color,
//!     gradient::Gradient,
//!     canvas::RecordingCanvas,
//!     stroke::{stroke_path_gradient, PathGradientOptions},
//!     path::Path,
//!     math::point,
//! };
//!
//! let mut builder = Path::builder();
//! builder.begin(point(0.0, 0.0));
//! builder.line_to(point(100.0, 0.0));
//! builder.end(false);
//! let path = builder.build();
//!
//! let gradient = Gradient::two_stops(Color::BLACK, Color::WHITE);
//! let mut canvas = RecordingCanvas::new();
//!
//! stroke_path_gradient(
//!     &mut canvas,
//!     &path,
//!     &gradient,
//!     &PathGradientOptions::DEFAULT.with_step(10.0),
//! ).unwrap();
//!
//! assert_eq!(canvas.segments().len(), 10);
//! assert_eq!(canvas.segments()[9].style.color, Color::WHITE);
//! ```

pub extern crate sweep_algorithms as algorithms;

#[cfg(feature = "serialization")]
#[macro_use]
extern crate serde;

#[macro_use]
extern crate log;

pub mod canvas;
pub mod color;
mod error;
pub mod gradient;
pub mod raster;
pub mod stroke;

pub use crate::algorithms::{geom, math, path};
pub use crate::canvas::{Canvas, LineCap, LineJoin, RecordingCanvas, ScopedStyle, StrokeStyle};
pub use crate::color::Color;
pub use crate::error::*;
pub use crate::gradient::{Gradient, GradientStop};
pub use crate::raster::PixelCanvas;
pub use crate::stroke::{stroke_path_gradient, PathGradientOptions, PathGradientStroker};
