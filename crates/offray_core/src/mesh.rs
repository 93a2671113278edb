//! Triangle mesh with a brute-force nearest-hit query.
//!
//! The mesh owns its vertex store; triangles refer to vertices by index so
//! that transforming the store in place is immediately visible to every
//! triangle without any aliasing.

use offray_math::{Aabb, Mat4, Mat4Ext, Ray, Vec3, INFINITY};
use thiserror::Error;

use crate::triangle::Triangle;

/// Errors raised while building a mesh.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeshError {
    #[error("Face {face} references vertex {index}, but the mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        face: usize,
        index: usize,
        vertex_count: usize,
    },
}

/// Nearest intersection found by `Mesh::nearest_hit`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Ray parameter of the hit point
    pub t: f32,
    /// Index into `Mesh::triangles()`
    pub triangle_index: usize,
}

/// A triangle mesh plus the bookkeeping used to frame it for rendering.
#[derive(Debug, Clone)]
pub struct Mesh {
    vertices: Vec<Vec3>,
    triangles: Vec<Triangle>,

    /// Arithmetic mean of the vertices, carried through transforms
    centroid: Vec3,

    /// Highest-Z vertex at load time, carried through transforms
    apex: Vec3,

    /// 2 / bounding-box diagonal at load time
    fit_scale: f32,

    /// Object-to-world matrix consumed by `apply_transform`
    transform: Mat4,
}

impl Mesh {
    /// Build a mesh from a vertex store and triangle index triples.
    ///
    /// Every index is validated against the vertex count; normals, centroid,
    /// apex and fit scale are computed from the untransformed vertices.
    pub fn new(vertices: Vec<Vec3>, faces: Vec<[usize; 3]>) -> Result<Self, MeshError> {
        let vertex_count = vertices.len();
        for (face, indices) in faces.iter().enumerate() {
            if let Some(&index) = indices.iter().find(|&&i| i >= vertex_count) {
                return Err(MeshError::IndexOutOfRange {
                    face,
                    index,
                    vertex_count,
                });
            }
        }

        let triangles: Vec<Triangle> = faces
            .into_iter()
            .map(|indices| Triangle::new(indices, &vertices))
            .collect();

        let degenerate = triangles.iter().filter(|t| t.is_degenerate()).count();
        if degenerate > 0 {
            log::debug!(
                "{} of {} triangles are degenerate and will never be hit",
                degenerate,
                triangles.len()
            );
        }

        let centroid = if vertices.is_empty() {
            Vec3::ZERO
        } else {
            vertices.iter().copied().sum::<Vec3>() / vertex_count as f32
        };

        // First vertex wins on equal Z
        let apex = vertices
            .iter()
            .copied()
            .reduce(|best, v| if v.z > best.z { v } else { best })
            .unwrap_or(Vec3::ZERO);

        let diagonal = Aabb::from_vertices(&vertices).diagonal();
        let fit_scale = if diagonal > 0.0 { 2.0 / diagonal } else { 1.0 };

        Ok(Self {
            vertices,
            triangles,
            centroid,
            apex,
            fit_scale,
            transform: Mat4::IDENTITY,
        })
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Get the number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn centroid(&self) -> Vec3 {
        self.centroid
    }

    /// Tracked highest-Z point, used to place the mesh in front of the camera.
    pub fn apex(&self) -> Vec3 {
        self.apex
    }

    /// Uniform scale that brings the load-time bounding diagonal to 2 units.
    pub fn fit_scale(&self) -> f32 {
        self.fit_scale
    }

    /// Bounding box of the current vertex positions.
    pub fn bounds(&self) -> Aabb {
        Aabb::from_vertices(&self.vertices)
    }

    /// The pending object-to-world matrix.
    pub fn transform(&self) -> Mat4 {
        self.transform
    }

    pub fn set_transform(&mut self, transform: Mat4) {
        self.transform = transform;
    }

    /// Current positions of triangle `index`'s three vertices.
    pub fn triangle_vertices(&self, index: usize) -> [Vec3; 3] {
        self.triangles[index].indices().map(|i| self.vertices[i])
    }

    /// Find the closest triangle hit by `ray`.
    ///
    /// Scans every triangle; on equal `t` the lower triangle index wins.
    pub fn nearest_hit(&self, ray: &Ray) -> Option<Hit> {
        let mut closest_so_far = INFINITY;
        let mut nearest = None;

        for (triangle_index, triangle) in self.triangles.iter().enumerate() {
            if let Some(t) = triangle.intersect(ray, &self.vertices) {
                if t < closest_so_far {
                    closest_so_far = t;
                    nearest = Some(Hit { t, triangle_index });
                }
            }
        }

        nearest
    }

    /// Apply the pending transform to the mesh in place.
    ///
    /// Vertices, centroid and apex go through the full affine matrix; face
    /// normals go through its inverse-transpose and are re-normalized. The
    /// matrix is kept, so calling this twice applies it twice.
    pub fn apply_transform(&mut self) {
        let m = self.transform;

        for v in &mut self.vertices {
            *v = m.transform_point3(*v);
        }
        self.centroid = m.transform_point3(self.centroid);
        self.apex = m.transform_point3(self.apex);

        let normal_matrix = m.normal_matrix();
        for triangle in &mut self.triangles {
            triangle.set_normal((normal_matrix * triangle.normal()).normalize_or_zero());
        }
    }

    /// Set `transform` as the pending matrix and apply it.
    pub fn transform_by(&mut self, transform: Mat4) {
        self.set_transform(transform);
        self.apply_transform();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::triangle::face_normal;

    fn single_triangle() -> Mesh {
        Mesh::new(
            vec![
                Vec3::new(-1.0, -1.0, 0.0),
                Vec3::new(1.0, -1.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            ],
            vec![[0, 1, 2]],
        )
        .unwrap()
    }

    /// Unit right triangle centered on (0, 0) at height z, facing +Z
    fn layer(z: f32) -> [Vec3; 3] {
        [
            Vec3::new(-1.0, -1.0, z),
            Vec3::new(1.0, -1.0, z),
            Vec3::new(0.0, 1.0, z),
        ]
    }

    fn stacked_mesh(depths: &[f32]) -> Mesh {
        let mut vertices = Vec::new();
        let mut faces = Vec::new();
        for (i, &z) in depths.iter().enumerate() {
            vertices.extend_from_slice(&layer(z));
            faces.push([3 * i, 3 * i + 1, 3 * i + 2]);
        }
        Mesh::new(vertices, faces).unwrap()
    }

    fn tetrahedron() -> Mesh {
        Mesh::new(
            vec![
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
                Vec3::new(0.0, 0.0, 1.0),
                Vec3::new(0.0, 0.0, 0.0),
            ],
            vec![[0, 1, 2], [0, 3, 1], [0, 2, 3], [1, 3, 2]],
        )
        .unwrap()
    }

    fn assert_vec_close(a: Vec3, b: Vec3) {
        assert!((a - b).length() < 1e-4, "{a:?} != {b:?}");
    }

    #[test]
    fn test_mesh_creation() {
        let mesh = single_triangle();

        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.transform(), Mat4::IDENTITY);
        assert_vec_close(mesh.triangles()[0].normal(), Vec3::Z);
    }

    #[test]
    fn test_out_of_range_index_rejected() {
        let err = Mesh::new(layer(0.0).to_vec(), vec![[0, 1, 2], [0, 3, 1]]).unwrap_err();

        assert_eq!(
            err,
            MeshError::IndexOutOfRange {
                face: 1,
                index: 3,
                vertex_count: 3
            }
        );
    }

    #[test]
    fn test_centroid_apex_and_fit_scale() {
        let mesh = Mesh::new(
            vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(2.0, 0.0, 5.0),
                Vec3::new(0.0, 3.0, 1.0),
                Vec3::new(2.0, 3.0, 6.0),
            ],
            vec![[0, 1, 2]],
        )
        .unwrap();

        assert_vec_close(mesh.centroid(), Vec3::new(1.0, 1.5, 3.0));
        assert_eq!(mesh.apex(), Vec3::new(2.0, 3.0, 6.0));
        // Diagonal of (2, 3, 6) is 7
        assert!((mesh.fit_scale() - 2.0 / 7.0).abs() < 1e-6);
    }

    #[test]
    fn test_apex_tie_keeps_first_vertex() {
        let mesh = single_triangle();
        assert_eq!(mesh.apex(), Vec3::new(-1.0, -1.0, 0.0));
    }

    #[test]
    fn test_empty_mesh() {
        let mesh = Mesh::new(Vec::new(), Vec::new()).unwrap();

        assert_eq!(mesh.centroid(), Vec3::ZERO);
        assert_eq!(mesh.fit_scale(), 1.0);
        assert_eq!(mesh.nearest_hit(&Ray::new(Vec3::ZERO, Vec3::NEG_Z)), None);
    }

    #[test]
    fn test_nearest_hit_picks_minimum_t() {
        let mesh = stacked_mesh(&[-5.0, -2.0, -3.0, 4.0]);
        let ray = Ray::new(Vec3::new(0.0, -0.2, 0.0), Vec3::NEG_Z);

        let hit = mesh.nearest_hit(&ray).expect("ray should hit");
        assert_eq!(hit.triangle_index, 1);
        assert!((hit.t - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_nearest_hit_matches_pairwise_scan() {
        let mesh = stacked_mesh(&[-7.0, -2.5, -9.0, -4.0, 1.0]);

        for origin in [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.3, -0.5, -3.0),
            Vec3::new(0.0, 0.0, -8.0),
            Vec3::new(0.0, 0.0, -20.0),
        ] {
            for direction in [Vec3::NEG_Z, Vec3::Z, Vec3::new(0.05, 0.02, -1.0)] {
                let ray = Ray::new(origin, direction);

                let expected = mesh
                    .triangles()
                    .iter()
                    .filter_map(|tri| tri.intersect(&ray, mesh.vertices()))
                    .fold(None, |best: Option<f32>, t| {
                        Some(best.map_or(t, |b| b.min(t)))
                    });

                assert_eq!(mesh.nearest_hit(&ray).map(|hit| hit.t), expected);
            }
        }
    }

    #[test]
    fn test_nearest_hit_tie_goes_to_first_triangle() {
        let mesh = Mesh::new(layer(-2.0).to_vec(), vec![[0, 1, 2], [0, 1, 2]]).unwrap();
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        assert_eq!(mesh.nearest_hit(&ray).unwrap().triangle_index, 0);
    }

    #[test]
    fn test_nearest_hit_miss() {
        let mesh = stacked_mesh(&[-2.0]);
        let ray = Ray::new(Vec3::new(10.0, 0.0, 0.0), Vec3::NEG_Z);

        assert_eq!(mesh.nearest_hit(&ray), None);
    }

    #[test]
    fn test_identity_transform_is_exact() {
        let mut mesh = tetrahedron();
        let original = mesh.vertices().to_vec();

        mesh.transform_by(Mat4::IDENTITY);

        assert_eq!(mesh.vertices(), original.as_slice());
    }

    #[test]
    fn test_transform_moves_centroid_and_apex() {
        let mut mesh = tetrahedron();
        let offset = Vec3::new(1.0, -2.0, 3.0);

        mesh.transform_by(Mat4::from_translation(offset));

        assert_vec_close(mesh.centroid(), Vec3::splat(0.25) + offset);
        assert_vec_close(mesh.apex(), Vec3::Z + offset);
    }

    #[test]
    fn test_transform_composition() {
        let m1 = Mat4::from_rotation_y(0.7) * Mat4::from_scale(Vec3::new(1.5, 0.5, 2.0));
        let m2 = Mat4::from_translation(Vec3::new(0.0, 1.0, -4.0)) * Mat4::from_rotation_x(-0.4);

        let mut stepwise = tetrahedron();
        stepwise.transform_by(m1);
        stepwise.transform_by(m2);

        let mut composed = tetrahedron();
        composed.transform_by(m2 * m1);

        for (a, b) in stepwise.vertices().iter().zip(composed.vertices()) {
            assert_vec_close(*a, *b);
        }
        for (a, b) in stepwise.triangles().iter().zip(composed.triangles()) {
            assert_vec_close(a.normal(), b.normal());
        }
        assert_vec_close(stepwise.centroid(), composed.centroid());
    }

    #[test]
    fn test_apply_twice_compounds() {
        let mut mesh = tetrahedron();
        mesh.set_transform(Mat4::from_translation(Vec3::X));
        mesh.apply_transform();
        mesh.apply_transform();

        assert_vec_close(mesh.vertices()[3], Vec3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn test_non_uniform_scale_uses_inverse_transpose() {
        let mut mesh = tetrahedron();
        let before = mesh.triangles()[0].normal();
        let scale = Mat4::from_scale(Vec3::new(2.0, 1.0, 1.0));

        mesh.transform_by(scale);

        let after = mesh.triangles()[0].normal();
        let naive = (scale.transform_vector3(before)).normalize();
        assert_vec_close(after, Vec3::new(0.5, 1.0, 1.0).normalize());
        assert!((after - naive).length() > 0.1);

        // Normals still agree with the transformed geometry
        for (i, tri) in mesh.triangles().iter().enumerate() {
            let [v0, v1, v2] = mesh.triangle_vertices(i);
            assert_vec_close(tri.normal(), face_normal(v0, v1, v2));
        }
    }

    #[test]
    fn test_mirror_transform_keeps_normals_consistent() {
        let mut mesh = tetrahedron();
        mesh.transform_by(Mat4::from_scale(Vec3::new(-1.0, 1.0, 1.0)));

        // Inverse-transpose of a mirror flips the normal along with the
        // geometry, so the cached normal is the opposite of the rewound face.
        let [v0, v1, v2] = mesh.triangle_vertices(0);
        assert_vec_close(mesh.triangles()[0].normal(), -face_normal(v0, v1, v2));
    }

    #[test]
    fn test_transform_then_hit() {
        let mut mesh = single_triangle();
        mesh.transform_by(Mat4::from_translation(Vec3::new(0.0, 0.0, -3.0)));

        let hit = mesh
            .nearest_hit(&Ray::new(Vec3::ZERO, Vec3::NEG_Z))
            .expect("ray should hit");
        assert!((hit.t - 3.0).abs() < 1e-5);
    }
}
