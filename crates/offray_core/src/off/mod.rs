//! OFF (Object File Format) support.
//!
//! Parses the ASCII variant of OFF into a validated `Mesh`.
//!
//! ## Supported
//!
//! - `OFF` header, with the counts on the same line or the next one
//! - `#` comments and blank lines anywhere
//! - Triangles and convex polygons (fan-triangulated)
//! - Trailing per-vertex / per-face color tokens (ignored)
//!
//! ## Not Yet Supported
//!
//! - Binary OFF
//! - `COFF`, `NOFF`, `STOFF` and other prefixed headers
//!
//! # Example
//!
//! ```ignore
//! use offray_core::off::load_off;
//!
//! let mesh = load_off("models/bunny.off")?;
//! println!("{} vertices, {} triangles", mesh.vertex_count(), mesh.triangle_count());
//! ```

mod loader;
mod parser;

pub use loader::*;
pub use parser::*;
