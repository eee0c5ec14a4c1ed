//! Indexed triangle mesh for CRT scenes.
//!
//! Vertices live once in a shared pool and triangles reference them by
//! index, so adjacent faces never duplicate positions. Face normals and
//! smoothed vertex normals are derived caches: they are built at
//! construction and must be rebuilt with [`Mesh::recalculate_normals`] after
//! any geometry mutation.

use crt_math::Vec3;
use thiserror::Error;

/// Three indices into a mesh's vertex pool, counter-clockwise.
pub type TriIndices = [u32; 3];

/// Errors raised while building or refreshing a mesh.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeshError {
    #[error(
        "triangle {triangle} references vertex {index}, but the mesh has {vertex_count} vertices"
    )]
    IndexOutOfRange {
        triangle: usize,
        index: u32,
        vertex_count: usize,
    },

    #[error("triangle {triangle} is degenerate (zero area)")]
    DegenerateTriangle { triangle: usize },

    #[error("incident face normals of vertex {vertex} cancel out")]
    DegenerateVertexNormal { vertex: usize },
}

/// Result type for mesh operations.
pub type MeshResult<T> = Result<T, MeshError>;

/// A triangle mesh with one material.
#[derive(Clone, Debug)]
pub struct Mesh {
    positions: Vec<Vec3>,
    triangles: Vec<TriIndices>,

    /// One unit normal per triangle
    face_normals: Vec<Vec3>,

    /// One smoothed unit normal per vertex (zero for unreferenced vertices)
    vertex_normals: Vec<Vec3>,

    material_index: usize,

    /// Set by mutators, cleared by `recalculate_normals`
    normals_dirty: bool,
}

impl Mesh {
    /// Build a mesh, validating every index and computing its normals.
    pub fn new(
        positions: Vec<Vec3>,
        triangles: Vec<TriIndices>,
        material_index: usize,
    ) -> MeshResult<Self> {
        for (i, tri) in triangles.iter().enumerate() {
            check_indices(i, tri, positions.len())?;
        }

        let mut mesh = Self {
            positions,
            triangles,
            face_normals: Vec::new(),
            vertex_normals: Vec::new(),
            material_index,
            normals_dirty: true,
        };
        mesh.recalculate_normals()?;
        Ok(mesh)
    }

    /// An empty mesh with room reserved for `vertices` and `triangles`.
    pub fn with_capacity(vertices: usize, triangles: usize, material_index: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertices),
            triangles: Vec::with_capacity(triangles),
            face_normals: Vec::with_capacity(triangles),
            vertex_normals: Vec::with_capacity(vertices),
            material_index,
            normals_dirty: false,
        }
    }

    /// Append a vertex. Leaves the normal caches stale.
    pub fn push_vertex(&mut self, position: Vec3) {
        self.positions.push(position);
        self.normals_dirty = true;
    }

    /// Append a triangle. Indices are checked against the current vertex
    /// pool. Leaves the normal caches stale.
    pub fn push_triangle(&mut self, tri: TriIndices) -> MeshResult<()> {
        check_indices(self.triangles.len(), &tri, self.positions.len())?;
        self.triangles.push(tri);
        self.normals_dirty = true;
        Ok(())
    }

    /// Rebuild face normals and smoothed vertex normals from the geometry.
    ///
    /// Each vertex normal is the normalized sum of the unit normals of every
    /// triangle that uses the vertex.
    pub fn recalculate_normals(&mut self) -> MeshResult<()> {
        let mut face_normals = Vec::with_capacity(self.triangles.len());
        let mut vertex_normals = vec![Vec3::ZERO; self.positions.len()];
        let mut referenced = vec![false; self.positions.len()];

        for (i, tri) in self.triangles.iter().enumerate() {
            let [p0, p1, p2] = tri.map(|idx| self.positions[idx as usize]);
            let normal = (p1 - p0)
                .cross(p2 - p0)
                .try_normalize()
                .ok_or(MeshError::DegenerateTriangle { triangle: i })?;

            for idx in tri {
                vertex_normals[*idx as usize] += normal;
                referenced[*idx as usize] = true;
            }
            face_normals.push(normal);
        }

        let mut unreferenced = 0;
        for (vertex, normal) in vertex_normals.iter_mut().enumerate() {
            if !referenced[vertex] {
                unreferenced += 1;
                continue;
            }
            *normal = normal
                .try_normalize()
                .ok_or(MeshError::DegenerateVertexNormal { vertex })?;
        }

        if unreferenced > 0 {
            log::debug!(
                "{} of {} vertices are not used by any triangle",
                unreferenced,
                self.positions.len()
            );
        }

        self.face_normals = face_normals;
        self.vertex_normals = vertex_normals;
        self.normals_dirty = false;
        Ok(())
    }

    /// True if geometry changed since the normals were last computed.
    pub fn normals_dirty(&self) -> bool {
        self.normals_dirty
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn triangles(&self) -> &[TriIndices] {
        &self.triangles
    }

    pub fn face_normals(&self) -> &[Vec3] {
        &self.face_normals
    }

    pub fn vertex_normals(&self) -> &[Vec3] {
        &self.vertex_normals
    }

    pub fn material_index(&self) -> usize {
        self.material_index
    }

    pub fn set_material_index(&mut self, material_index: usize) {
        self.material_index = material_index;
    }

    /// Get the number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Get the number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Positions of triangle `index`, in winding order.
    pub fn triangle_vertices(&self, index: usize) -> [Vec3; 3] {
        self.triangles[index].map(|i| self.positions[i as usize])
    }

    /// Smoothed normals at the corners of triangle `index`, in winding order.
    pub fn triangle_vertex_normals(&self, index: usize) -> [Vec3; 3] {
        self.triangles[index].map(|i| self.vertex_normals[i as usize])
    }
}

fn check_indices(triangle: usize, tri: &TriIndices, vertex_count: usize) -> MeshResult<()> {
    match tri.iter().find(|&&index| index as usize >= vertex_count) {
        Some(&index) => Err(MeshError::IndexOutOfRange {
            triangle,
            index,
            vertex_count,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Unit quad in the XY plane made of two CCW triangles facing +Z.
    fn quad() -> Mesh {
        let positions = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ];
        Mesh::new(positions, vec![[0, 1, 2], [0, 2, 3]], 0).unwrap()
    }

    #[test]
    fn test_mesh_creation() {
        let mesh = quad();

        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.face_normals().len(), 2);
        assert_eq!(mesh.vertex_normals().len(), 4);
        assert!(!mesh.normals_dirty());
    }

    #[test]
    fn test_face_normals_follow_ccw_winding() {
        let mesh = quad();

        for normal in mesh.face_normals() {
            assert!((*normal - Vec3::Z).length() < 1e-6);
        }
    }

    #[test]
    fn test_vertex_normals_are_normalized_average() {
        // Two faces folded 90 degrees along the shared edge v0-v1
        let positions = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
        ];
        // Face A in XY plane (normal +Z), face B in XZ plane (normal +Y)
        let mesh = Mesh::new(positions, vec![[0, 1, 2], [0, 3, 1]], 0).unwrap();

        assert!((mesh.face_normals()[0] - Vec3::Z).length() < 1e-6);
        assert!((mesh.face_normals()[1] - Vec3::Y).length() < 1e-6);

        let shared = Vec3::new(0.0, 1.0, 1.0).normalize();
        assert!((mesh.vertex_normals()[0] - shared).length() < 1e-6);
        assert!((mesh.vertex_normals()[1] - shared).length() < 1e-6);
        assert!((mesh.vertex_normals()[2] - Vec3::Z).length() < 1e-6);
        assert!((mesh.vertex_normals()[3] - Vec3::Y).length() < 1e-6);
    }

    #[test]
    fn test_index_out_of_range_rejected() {
        let positions = vec![Vec3::ZERO, Vec3::X, Vec3::Y];
        let err = Mesh::new(positions, vec![[0, 1, 3]], 0).unwrap_err();

        assert_eq!(
            err,
            MeshError::IndexOutOfRange {
                triangle: 0,
                index: 3,
                vertex_count: 3
            }
        );
    }

    #[test]
    fn test_degenerate_triangle_rejected() {
        let positions = vec![Vec3::ZERO, Vec3::X, Vec3::X * 2.0];
        let err = Mesh::new(positions, vec![[0, 1, 2]], 0).unwrap_err();

        assert_eq!(err, MeshError::DegenerateTriangle { triangle: 0 });
    }

    #[test]
    fn test_opposing_faces_give_degenerate_vertex_normal() {
        let positions = vec![Vec3::ZERO, Vec3::X, Vec3::Y];
        let err = Mesh::new(positions, vec![[0, 1, 2], [0, 2, 1]], 0).unwrap_err();

        assert!(matches!(err, MeshError::DegenerateVertexNormal { .. }));
    }

    #[test]
    fn test_unreferenced_vertex_keeps_zero_normal() {
        let positions = vec![Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::new(5.0, 5.0, 5.0)];
        let mesh = Mesh::new(positions, vec![[0, 1, 2]], 0).unwrap();

        assert_eq!(mesh.vertex_normals()[3], Vec3::ZERO);
    }

    #[test]
    fn test_push_marks_normals_dirty_until_recalculated() {
        let mut mesh = Mesh::with_capacity(3, 1, 2);
        assert!(!mesh.normals_dirty());

        mesh.push_vertex(Vec3::ZERO);
        mesh.push_vertex(Vec3::X);
        mesh.push_vertex(Vec3::Y);
        mesh.push_triangle([0, 1, 2]).unwrap();
        assert!(mesh.normals_dirty());
        assert!(mesh.face_normals().is_empty());

        mesh.recalculate_normals().unwrap();
        assert!(!mesh.normals_dirty());
        assert_eq!(mesh.face_normals().len(), 1);
        assert_eq!(mesh.material_index(), 2);
    }

    #[test]
    fn test_push_triangle_checks_indices() {
        let mut mesh = Mesh::with_capacity(2, 1, 0);
        mesh.push_vertex(Vec3::ZERO);
        mesh.push_vertex(Vec3::X);

        assert!(mesh.push_triangle([0, 1, 2]).is_err());
        assert_eq!(mesh.triangle_count(), 0);
    }

    #[test]
    fn test_triangle_accessors() {
        let mesh = quad();

        let [a, b, c] = mesh.triangle_vertices(1);
        assert_eq!(a, Vec3::ZERO);
        assert_eq!(b, Vec3::new(1.0, 1.0, 0.0));
        assert_eq!(c, Vec3::new(0.0, 1.0, 0.0));

        for n in mesh.triangle_vertex_normals(1) {
            assert!((n - Vec3::Z).length() < 1e-6);
        }
    }
}
