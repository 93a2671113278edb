use crate::{Interval, Vec3};

/// Axis-aligned bounding box, one interval per axis.
///
/// Used to size meshes (fit scale from the diagonal); no padding is applied,
/// so a flat mesh keeps a zero-width axis.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub x: Interval,
    pub y: Interval,
    pub z: Interval,
}

impl Aabb {
    /// Smallest box containing every point. Empty input gives `Aabb::EMPTY`.
    pub fn from_vertices(points: &[Vec3]) -> Self {
        points.iter().fold(Self::EMPTY, |bounds, p| Self {
            x: bounds.x.include(p.x),
            y: bounds.y.include(p.y),
            z: bounds.z.include(p.z),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty() || self.y.is_empty() || self.z.is_empty()
    }

    /// Per-axis size of the box; zero for an empty box.
    pub fn extent(&self) -> Vec3 {
        if self.is_empty() {
            return Vec3::ZERO;
        }
        Vec3::new(self.x.size(), self.y.size(), self.z.size())
    }

    /// Length of the box diagonal.
    pub fn diagonal(&self) -> f32 {
        self.extent().length()
    }

    pub const EMPTY: Aabb = Aabb {
        x: Interval::EMPTY,
        y: Interval::EMPTY,
        z: Interval::EMPTY,
    };
}
