//! Math types shared by the offray crates.
//!
//! Vectors and matrices come straight from `glam`; this crate only adds the
//! ray, the bounding-volume helpers and the normal-transform extension.

// Re-export glam for convenience
pub use glam::*;

mod aabb;
mod consts;
mod interval;
mod ray;
mod transform;

pub use aabb::Aabb;
pub use consts::{EPSILON, INFINITY, PI};
pub use interval::Interval;
pub use ray::Ray;
pub use transform::Mat4Ext;

/// Clamp a value to the [0, 1] range.
#[inline]
pub fn clamp_01(x: f32) -> f32 {
    x.clamp(0.0, 1.0)
}
