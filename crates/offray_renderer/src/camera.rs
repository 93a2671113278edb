//! Pinhole camera for primary ray generation.

use offray_math::{Ray, Vec3};

/// Sub-sample positions inside a pixel, as fractions of the pixel size.
///
/// A fixed 2x2 grid; no jitter.
pub const SUBPIXEL_OFFSETS: [(f32, f32); 4] = [(0.25, 0.25), (0.75, 0.25), (0.25, 0.75), (0.75, 0.75)];

/// Camera at the world origin looking down -Z with +Y up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub image_width: u32,
    pub image_height: u32,

    /// Vertical field of view in degrees
    vfov: f32,
}

impl Camera {
    /// Create a new camera with default settings (640x480, 90 degree fov).
    pub fn new() -> Self {
        Self {
            image_width: 640,
            image_height: 480,
            vfov: 90.0,
        }
    }

    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.image_width = width;
        self.image_height = height;
        self
    }

    /// Set the vertical field of view, in degrees.
    pub fn with_fov(mut self, vfov: f32) -> Self {
        self.vfov = vfov;
        self
    }

    pub fn fov(&self) -> f32 {
        self.vfov
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.image_width as f32 / self.image_height as f32
    }

    /// Half-height of the image plane at distance 1: tan(fov / 2).
    fn plane_scale(&self) -> f32 {
        (self.vfov.to_radians() * 0.5).tan()
    }

    /// Ray through the continuous pixel coordinate (sx, sy), where (0, 0)
    /// is the top-left corner of the image and (width, height) the
    /// bottom-right.
    pub fn primary_ray(&self, sx: f32, sy: f32) -> Ray {
        let scale = self.plane_scale();
        let x = (2.0 * sx / self.image_width as f32 - 1.0) * self.aspect_ratio() * scale;
        let y = (1.0 - 2.0 * sy / self.image_height as f32) * scale;

        Ray::new(Vec3::ZERO, Vec3::new(x, y, -1.0))
    }

    /// The four supersampling rays for pixel (i, j).
    pub fn subpixel_rays(&self, i: u32, j: u32) -> [Ray; 4] {
        SUBPIXEL_OFFSETS.map(|(dx, dy)| self.primary_ray(i as f32 + dx, j as f32 + dy))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
