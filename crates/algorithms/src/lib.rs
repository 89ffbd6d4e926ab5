#![deny(bare_trait_objects)]
#![allow(clippy::float_cmp)]

//! 2d path measurement and sampling algorithms.
//!
//! This crate is reexported in [sweep](https://docs.rs/sweep/).

pub extern crate sweep_path as path;

#[cfg(feature = "serialization")]
#[macro_use]
extern crate serde;

pub mod aabb;
pub mod length;
pub mod measure;
pub mod sample;

pub use crate::path::geom;
pub use crate::path::math;
