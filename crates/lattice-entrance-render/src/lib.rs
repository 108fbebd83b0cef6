//! Geometry and transform types for Lattice Entrance.
//!
//! The animation core produces four numbers per frame (offset x/y, opacity,
//! scale). This crate provides the small amount of geometry an embedder needs
//! to turn those numbers into a placement for the animated child.

mod transform;
mod types;

pub use transform::Transform2D;
pub use types::{Point, Size};
