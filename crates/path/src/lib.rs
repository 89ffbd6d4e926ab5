#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::match_like_matches_macro)]

//! Data structures and traits to work with paths (vector graphics).
//!
//! This crate is reexported in [sweep](https://docs.rs/sweep/).
//!
//! # Examples
//!
//! ```
//! use sweep_path::Path;
//! use sweep_path::math::point;
//!
//! // Create a builder object to build the path.
//! let mut builder = Path::builder();
//!
//! builder.begin(point(0.0, 0.0));
//! builder.line_to(point(1.0, 2.0));
//! builder.cubic_bezier_to(point(2.0, 2.0), point(3.0, 1.0), point(3.0, 0.0));
//! builder.close();
//!
//! // Generate the actual path object.
//! let path = builder.build();
//!
//! for event in &path {
//!     println!("{:?}", event);
//! }
//! ```

pub use sweep_geom as geom;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

pub mod builder;
mod events;
pub mod path;

pub use crate::events::*;
#[doc(inline)]
pub use crate::path::{Builder, Path};

pub mod traits {
    //! `sweep_path` traits reexported here for convenience.

    pub use crate::builder::PathBuilder;
    pub use crate::geom::Segment;
}

pub mod math {
    //! f32 version of the sweep_geom types used everywhere. Most other sweep
    //! crates reexport them.

    use crate::geom::euclid;

    /// Alias for ```euclid::default::Point2D<f32>```.
    pub type Point = euclid::default::Point2D<f32>;

    /// Alias for ```euclid::default::Vector2D<f32>```.
    pub type Vector = euclid::default::Vector2D<f32>;

    /// Alias for ```euclid::default::Box2D<f32>```
    pub type Box2D = euclid::default::Box2D<f32>;

    /// Shorthand for `Vector::new(x, y)`.
    #[inline]
    pub fn vector(x: f32, y: f32) -> Vector {
        Vector::new(x, y)
    }

    /// Shorthand for `Point::new(x, y)`.
    #[inline]
    pub fn point(x: f32, y: f32) -> Point {
        Point::new(x, y)
    }
}
