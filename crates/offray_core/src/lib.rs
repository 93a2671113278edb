//! offray core - triangle meshes and their intersection queries.
//!
//! This crate provides:
//!
//! - **Geometry**: `Triangle` (index-based, cached normal) and `Mesh`
//!   (vertex store, nearest-hit query, in-place transform application)
//! - **OFF support**: parsing and loading of ASCII OFF mesh files
//!
//! # Example
//!
//! ```ignore
//! use offray_core::off::load_off;
//! use offray_math::{Ray, Vec3};
//!
//! let mesh = load_off("bunny.off")?;
//! let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
//! if let Some(hit) = mesh.nearest_hit(&ray) {
//!     println!("hit triangle {} at t = {}", hit.triangle_index, hit.t);
//! }
//! ```

pub mod mesh;
pub mod off;
pub mod triangle;

// Re-export commonly used types
pub use mesh::{Hit, Mesh, MeshError};
pub use off::{load_off, load_off_from_string};
pub use triangle::Triangle;
