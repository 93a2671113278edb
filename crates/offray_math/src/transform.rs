// Normal transform utilities for Mat4
//
// glam::Mat4 already provides transform_point3() and inverse(); surface
// normals need the inverse-transpose of the linear part instead.

use glam::{Mat3, Mat4};

/// Extension trait for Mat4 covering normal transformation.
pub trait Mat4Ext {
    /// Inverse-transpose of the upper-left 3x3 (the normal matrix).
    ///
    /// Non-finite for a singular matrix; callers re-normalize with
    /// `normalize_or_zero`, which turns that into a zero normal.
    fn normal_matrix(&self) -> Mat3;
}

impl Mat4Ext for Mat4 {
    fn normal_matrix(&self) -> Mat3 {
        Mat3::from_mat4(*self).inverse().transpose()
    }
}
