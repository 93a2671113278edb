//! Facing-ratio shading and the per-pixel render loop.
//!
//! Implements:
//! - Fixed 2x2 supersampling per pixel
//! - Shading by max(0, N . -D) times a base color
//! - Row-parallel rendering with rayon

use offray_core::Mesh;
use offray_math::{clamp_01, Ray, Vec3};
use rayon::prelude::*;

use crate::camera::{Camera, SUBPIXEL_OFFSETS};

/// Linear RGB color, channels nominally in [0, 1].
pub type Color = Vec3;

/// Render configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    /// Color when a sub-ray hits nothing
    pub background: Color,
    /// Color multiplied by the facing ratio on a hit
    pub shade_color: Color,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            background: Color::new(1.0, 0.0, 0.0),
            shade_color: Color::new(0.0, 1.0, 0.0),
        }
    }
}

/// Clamped cosine between a surface normal and the reversed ray direction.
#[inline]
pub fn facing_ratio(ray: &Ray, normal: Vec3) -> f32 {
    normal.dot(-ray.direction()).max(0.0)
}

/// Compute the color seen by a single ray.
pub fn ray_color(ray: &Ray, mesh: &Mesh, config: &RenderConfig) -> Color {
    match mesh.nearest_hit(ray) {
        Some(hit) => {
            let normal = mesh.triangles()[hit.triangle_index].normal();
            facing_ratio(ray, normal) * config.shade_color
        }
        None => config.background,
    }
}

/// Render pixel (i, j) as the average of its four sub-ray colors.
pub fn render_pixel(camera: &Camera, mesh: &Mesh, i: u32, j: u32, config: &RenderConfig) -> Color {
    let sum: Color = camera
        .subpixel_rays(i, j)
        .iter()
        .map(|ray| ray_color(ray, mesh, config))
        .sum();

    sum / SUBPIXEL_OFFSETS.len() as f32
}

/// Convert a color to 8-bit RGB by clamping and truncating (no gamma).
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    let r = (255.0 * clamp_01(color.x)) as u8;
    let g = (255.0 * clamp_01(color.y)) as u8;
    let b = (255.0 * clamp_01(color.z)) as u8;
    [r, g, b]
}

/// Row-major image, top row first.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Convert to packed RGB bytes.
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|&color| color_to_rgb(color))
            .collect()
    }
}

/// Render the mesh to an image buffer.
///
/// Rows are rendered in parallel. The mesh is only borrowed immutably, so it
/// cannot be transformed while the render is running.
pub fn render(camera: &Camera, mesh: &Mesh, config: &RenderConfig) -> ImageBuffer {
    let mut image = ImageBuffer::new(camera.image_width, camera.image_height);
    if image.pixels.is_empty() {
        return image;
    }

    log::debug!(
        "Rendering {}x{} over {} triangles",
        camera.image_width,
        camera.image_height,
        mesh.triangle_count()
    );

    image
        .pixels
        .par_chunks_mut(camera.image_width as usize)
        .enumerate()
        .for_each(|(j, row)| {
            for (i, pixel) in row.iter_mut().enumerate() {
                *pixel = render_pixel(camera, mesh, i as u32, j as u32, config);
            }
        });

    image
}
