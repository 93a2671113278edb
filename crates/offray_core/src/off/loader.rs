//! OFF file loading.
//!
//! Validates the file name, reads the file, parses it and builds a `Mesh`.
//! Nothing here terminates the process; every failure is a `LoadError` for
//! the caller to report.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::mesh::{Mesh, MeshError};
use crate::off::parser::{parse_off, ParseError};

/// Errors that can occur during OFF loading.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Invalid mesh: {0}")]
    Mesh(#[from] MeshError),

    #[error("Not an OFF file (expected a .off extension): {}", .0.display())]
    InvalidExtension(PathBuf),
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Returns true if `path` ends in `.off` (ASCII case-insensitive).
pub fn has_off_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("off"))
}

/// Load an OFF file from disk.
///
/// # Example
///
/// ```ignore
/// use offray_core::off::load_off;
///
/// let mesh = load_off("models/teapot.off")?;
/// ```
pub fn load_off<P: AsRef<Path>>(path: P) -> LoadResult<Mesh> {
    let path = path.as_ref();
    if !has_off_extension(path) {
        return Err(LoadError::InvalidExtension(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let mesh = load_off_from_string(&content)?;

    log::debug!(
        "Loaded {}: {} vertices, {} triangles",
        path.display(),
        mesh.vertex_count(),
        mesh.triangle_count()
    );

    Ok(mesh)
}

/// Build a mesh from OFF text already in memory.
pub fn load_off_from_string(content: &str) -> LoadResult<Mesh> {
    let data = parse_off(content)?;
    let mesh = Mesh::new(data.vertices, data.faces)?;
    Ok(mesh)
}
