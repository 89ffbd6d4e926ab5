#![deny(bare_trait_objects)]

//! Stroke 2D paths with gradients that follow their arc length.
//!
//! # Crates
//!
//! This meta-crate (`sweep`) reexports the following sub-crates for convenience:
//!
//! * [![crate](https://img.shields.io/crates/v/sweep_paint.svg)](https://crates.io/crates/sweep_paint)
//!   [![doc](https://docs.rs/sweep_paint/badge.svg)](https://docs.rs/sweep_paint) -
//!   **sweep_paint** - Colors, gradients, the canvas abstraction and the path gradient
//!   stroker.
//! * [![crate](https://img.shields.io/crates/v/sweep_algorithms.svg)](https://crates.io/crates/sweep_algorithms)
//!   [![doc](https://docs.rs/sweep_algorithms/badge.svg)](https://docs.rs/sweep_algorithms) -
//!   **sweep_algorithms** - Arc-length measurements and sampling, bounding boxes.
//! * **sweep_path** - Tools to build and iterate over paths.
//! * **sweep_geom** - Line segments and bézier curves, flattening and lengths.
//! * **sweep_extra** - SVG path data parser, behind the `extra` feature flag.
//!
//! Each `sweep_<name>` crate is reexported as a `<name>` module in `sweep`. For example:
//!
//! ```ignore
//! extern crate sweep_paint;
//! use sweep_paint::Gradient;
//! ```
//!
//! Is equivalent to:
//!
//! ```ignore
//! extern crate sweep;
//! use sweep::paint::Gradient;
//! ```
//!
//! # Feature flags
//!
//! - `serialization`: implements serde's `Serialize` and `Deserialize` for the value types.
//! - `extra`: enables the `sweep_extra` crate.
//!
//! # Example
//!
//! ```
//! use sweep::math::point;
//! use sweep::path::Path;
//! use sweep::paint::{Canvas, Color, Gradient, LineCap, PixelCanvas};
//! use sweep::paint::stroke::{stroke_path_gradient, PathGradientOptions};
//!
//! let mut builder = Path::builder();
//! builder.begin(point(10.0, 10.0));
//! builder.quadratic_bezier_to(point(50.0, 90.0), point(90.0, 10.0));
//! builder.end(false);
//! let path = builder.build();
//!
//! let gradient = Gradient::two_stops(Color::RED, Color::BLUE);
//! let mut canvas = PixelCanvas::with_background(100, 100, Color::WHITE);
//! canvas.set_color(Color::GREEN);
//!
//! stroke_path_gradient(
//!     &mut canvas,
//!     &path,
//!     &gradient,
//!     &PathGradientOptions::DEFAULT.with_line_width(4.0).with_line_cap(LineCap::Round),
//! ).unwrap();
//!
//! // The style of the canvas is left untouched.
//! assert_eq!(canvas.style().color, Color::GREEN);
//! ```

pub extern crate sweep_algorithms;
#[cfg(feature = "extra")]
pub extern crate sweep_extra;
pub extern crate sweep_paint;

pub use sweep_algorithms as algorithms;
#[cfg(feature = "extra")]
pub use sweep_extra as extra;
pub use sweep_paint as paint;
pub use algorithms::geom;
pub use algorithms::path;

pub use path::math;
