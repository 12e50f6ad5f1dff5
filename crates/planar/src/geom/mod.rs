//! 2D value types for the plane and the viewport.
//!
//! Purpose
//! - `Vec2` (nalgebra) for points in either space, `Affine2` for the map between them.
//! - A single `distance` routine so every algorithm and picking agree bit-for-bit.
//!
//! Conventions
//! - World/plane coordinates: y up, unit = one grid cell.
//! - Screen/viewport coordinates: origin top-left, y down, unit = one pixel.
//! - Affine maps only ever compose translations and nonzero scalings, so they stay invertible.

pub mod rand;
mod types;
mod util;

pub use types::Affine2;
pub use util::{cmp_f64, distance};

#[cfg(test)]
mod tests;
