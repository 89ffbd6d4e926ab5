#![deny(bare_trait_objects)]

//! Various optional utilities for the sweep crate.

extern crate sweep_path as path;

pub use crate::path::geom::euclid;
pub use crate::path::math;

pub mod parser;
