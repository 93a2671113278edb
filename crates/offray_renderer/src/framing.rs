//! Places a loaded mesh in front of the camera.
//!
//! Two passes: center, fit and tilt the mesh about its centroid, then push
//! it down -Z until its tracked apex sits `view_distance` beyond the unit
//! image plane.

use offray_core::Mesh;
use offray_math::{Mat4, Vec3};

/// Settings for `frame_mesh`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FramingConfig {
    /// Tilt about X, applied after the Y rotation (degrees)
    pub rotate_x_degrees: f32,
    /// Turn about Y (degrees)
    pub rotate_y_degrees: f32,
    /// Gap between the image plane (z = -1) and the apex
    pub view_distance: f32,
}

impl Default for FramingConfig {
    fn default() -> Self {
        Self {
            rotate_x_degrees: 30.0,
            rotate_y_degrees: -30.0,
            view_distance: 0.8,
        }
    }
}

/// Matrix that moves the centroid to the origin, scales by the fit scale
/// and applies the configured rotations.
pub fn center_transform(mesh: &Mesh, config: &FramingConfig) -> Mat4 {
    Mat4::from_rotation_x(config.rotate_x_degrees.to_radians())
        * Mat4::from_rotation_y(config.rotate_y_degrees.to_radians())
        * Mat4::from_scale(Vec3::splat(mesh.fit_scale()))
        * Mat4::from_translation(-mesh.centroid())
}

/// Stage `mesh` for rendering. Transforms are applied in place, one
/// `apply_transform` per matrix.
///
/// The push-back depth comes from the apex, which is the whole highest-Z
/// vertex carried through the rotations. After a tilt it is generally no
/// longer the frontmost point, and its depth differs from that of a point
/// tracked on the Z axis alone.
pub fn frame_mesh(mesh: &mut Mesh, config: &FramingConfig) {
    mesh.transform_by(center_transform(mesh, config));

    let depth = -mesh.apex().z - 1.0 - config.view_distance;
    mesh.transform_by(Mat4::from_translation(Vec3::new(0.0, 0.0, depth)));

    log::debug!(
        "Framed mesh: centroid {:?}, apex {:?}",
        mesh.centroid(),
        mesh.apex()
    );
}
