//! Triangle primitive for ray tracing.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection.

use crate::hittable::{Hit, Hittable};
use crt_math::{Interval, Ray, Vec3, EPSILON};
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriangleError {
    #[error("triangle vertices are collinear (zero area)")]
    Degenerate,
}

/// A triangle with counter-clockwise vertices and a cached unit normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    vertices: [Vec3; 3],
    /// Pre-computed face normal (unit length)
    normal: Vec3,
}

impl Triangle {
    /// Create a new triangle from three vertices.
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3) -> Result<Self, TriangleError> {
        let normal = face_normal(v0, v1, v2)?;
        Ok(Self {
            vertices: [v0, v1, v2],
            normal,
        })
    }

    /// Create a triangle with a pre-computed unit normal (from a mesh's
    /// face normal cache).
    pub fn with_normal(v0: Vec3, v1: Vec3, v2: Vec3, normal: Vec3) -> Self {
        Self {
            vertices: [v0, v1, v2],
            normal,
        }
    }

    pub fn vertices(&self) -> [Vec3; 3] {
        self.vertices
    }

    /// Vertex `index` (0, 1 or 2).
    ///
    /// # Panics
    ///
    /// Panics if `index > 2`.
    pub fn vertex(&self, index: usize) -> Vec3 {
        assert!(index < 3, "triangle vertex index {index} out of range [0, 2]");
        self.vertices[index]
    }

    /// Move one vertex and recompute the normal. The triangle is left
    /// unchanged if the move would make it degenerate.
    ///
    /// # Panics
    ///
    /// Panics if `index > 2`.
    pub fn set_vertex(&mut self, index: usize, position: Vec3) -> Result<(), TriangleError> {
        assert!(index < 3, "triangle vertex index {index} out of range [0, 2]");
        let mut vertices = self.vertices;
        vertices[index] = position;

        let [v0, v1, v2] = vertices;
        self.normal = face_normal(v0, v1, v2)?;
        self.vertices = vertices;
        Ok(())
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }
}

fn face_normal(v0: Vec3, v1: Vec3, v2: Vec3) -> Result<Vec3, TriangleError> {
    (v1 - v0)
        .cross(v2 - v0)
        .try_normalize()
        .ok_or(TriangleError::Degenerate)
}

impl Hittable for Triangle {
    /// Möller-Trumbore ray-triangle intersection algorithm.
    ///
    /// Both faces are hittable. The returned normal is the face normal as
    /// stored, not flipped towards the ray.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<Hit> {
        let [v0, v1, v2] = self.vertices;
        let edge1 = v1 - v0;
        let edge2 = v2 - v0;

        let h = ray.direction().cross(edge2);
        let det = edge1.dot(h);

        // Ray is parallel to triangle
        if det.abs() < EPSILON {
            return None;
        }

        let f = 1.0 / det;
        let s = ray.origin() - v0;
        let u = f * s.dot(h);

        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(edge1);
        let v = f * ray.direction().dot(q);

        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = f * edge2.dot(q);
        if !ray_t.contains(t) {
            return None;
        }

        Some(Hit {
            t,
            p: ray.at(t),
            normal: self.normal,
            u,
            v,
            w: 1.0 - u - v,
            mesh: 0,
            triangle: 0,
        })
    }
}
