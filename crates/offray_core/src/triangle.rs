//! Triangle primitive for ray casting.
//!
//! Uses a plane-then-inside test: intersect the supporting plane, then check
//! the hit point against the three directed edges.

use offray_math::{Ray, Vec3, EPSILON};

/// A triangle referencing three vertices of its mesh by index.
///
/// The normal is cached at construction and only refreshed by
/// `Mesh::apply_transform`; moving vertices any other way leaves it stale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    indices: [usize; 3],
    /// Unit face normal, zero for degenerate triangles
    normal: Vec3,
}

impl Triangle {
    /// Create a triangle over `vertices[indices[..]]`, computing its normal
    /// from the winding `(v1 - v0) x (v2 - v0)`.
    ///
    /// # Panics
    ///
    /// Panics if an index is out of range for `vertices`. `Mesh::new`
    /// validates indices before building triangles.
    pub fn new(indices: [usize; 3], vertices: &[Vec3]) -> Self {
        let [v0, v1, v2] = indices.map(|i| vertices[i]);
        Self {
            indices,
            normal: face_normal(v0, v1, v2),
        }
    }

    /// Vertex indices into the owning mesh's vertex store.
    #[inline]
    pub fn indices(&self) -> [usize; 3] {
        self.indices
    }

    /// Cached unit normal.
    #[inline]
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Zero-area triangles carry a zero normal and are never hit.
    pub fn is_degenerate(&self) -> bool {
        self.normal == Vec3::ZERO
    }

    pub(crate) fn set_normal(&mut self, normal: Vec3) {
        self.normal = normal;
    }

    /// Intersect `ray` with this triangle, resolving vertex positions from
    /// `vertices`.
    ///
    /// Returns the ray parameter `t` of the hit point, or `None` when the
    /// ray is parallel to the plane, the plane lies behind the origin or
    /// passes through it (`t <= 0`), or the hit point falls outside any edge.
    pub fn intersect(&self, ray: &Ray, vertices: &[Vec3]) -> Option<f32> {
        let [v0, v1, v2] = self.indices.map(|i| vertices[i]);
        let n = self.normal;

        let n_dot_dir = n.dot(ray.direction());
        if n_dot_dir.abs() < EPSILON {
            return None;
        }

        let t = n.dot(v0 - ray.origin()) / n_dot_dir;
        if t <= 0.0 {
            return None;
        }

        let p = ray.at(t);

        // Inside-outside test, one half-plane per directed edge
        for (start, end) in [(v0, v1), (v1, v2), (v2, v0)] {
            let c = (end - start).cross(p - start);
            if n.dot(c) < 0.0 {
                return None;
            }
        }

        Some(t)
    }
}

/// Unit normal of the triangle (v0, v1, v2), or zero if it has no area.
pub fn face_normal(v0: Vec3, v1: Vec3, v2: Vec3) -> Vec3 {
    (v1 - v0).cross(v2 - v0).normalize_or_zero()
}
