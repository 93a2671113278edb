//! offray renderer - facing-ratio ray casting of a single mesh.
//!
//! One camera at the world origin looking down -Z, a fixed 2x2 grid of
//! sub-rays per pixel, and one brute-force nearest-hit query per sub-ray.

mod camera;
mod framing;
mod ppm;
mod renderer;

pub use camera::{Camera, SUBPIXEL_OFFSETS};
pub use framing::{center_transform, frame_mesh, FramingConfig};
pub use ppm::{save_ppm, write_ppm};
pub use renderer::{
    color_to_rgb, facing_ratio, ray_color, render, render_pixel, Color, ImageBuffer, RenderConfig,
};

/// Re-export Vec3 and common math types from offray_math
pub use offray_math::{Mat4, Ray, Vec3};
