//! Numeric constants shared by the intersection code.

/// Threshold below which a ray is considered parallel to a plane.
pub const EPSILON: f32 = 1e-8;

/// Sentinel for "no hit yet" in nearest-hit searches.
pub const INFINITY: f32 = f32::INFINITY;

pub use std::f32::consts::PI;
