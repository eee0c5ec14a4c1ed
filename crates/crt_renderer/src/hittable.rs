//! Hittable trait and Hit record for ray-object intersection.
//!
//! Nearest-hit search is two-level: each mesh scans its triangles, and the
//! scene keeps the closest of the per-mesh results. Both levels shrink the
//! search interval to the closest hit found so far.

use crate::triangle::Triangle;
use crt_core::{Mesh, Scene};
use crt_math::{Interval, Ray, Vec3};

/// Record of a ray-triangle intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Point of intersection
    pub p: Vec3,
    /// Face normal of the hit triangle (not flipped towards the ray)
    pub normal: Vec3,
    /// Barycentric weight of vertex 1
    pub u: f32,
    /// Barycentric weight of vertex 2
    pub v: f32,
    /// Barycentric weight of vertex 0 (`1 - u - v`)
    pub w: f32,
    /// Index of the hit mesh in the scene
    pub mesh: usize,
    /// Index of the hit triangle in its mesh
    pub triangle: usize,
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Nearest intersection with `t` inside `ray_t`, if any.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<Hit>;

    /// True if anything intersects the ray inside `ray_t`.
    fn occluded(&self, ray: &Ray, ray_t: Interval) -> bool {
        self.hit(ray, ray_t).is_some()
    }
}

/// View of triangle `index` of `mesh`, using the mesh's cached face normal.
pub fn mesh_triangle(mesh: &Mesh, index: usize) -> Triangle {
    let [v0, v1, v2] = mesh.triangle_vertices(index);
    Triangle::with_normal(v0, v1, v2, mesh.face_normals()[index])
}

impl Hittable for Mesh {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<Hit> {
        let mut closest: Option<Hit> = None;
        let mut closest_so_far = ray_t.max;

        for index in 0..self.triangle_count() {
            let triangle = mesh_triangle(self, index);
            if let Some(hit) = triangle.hit(ray, ray_t.with_max(closest_so_far)) {
                closest_so_far = hit.t;
                closest = Some(Hit {
                    triangle: index,
                    ..hit
                });
            }
        }

        closest
    }

    fn occluded(&self, ray: &Ray, ray_t: Interval) -> bool {
        (0..self.triangle_count()).any(|index| mesh_triangle(self, index).hit(ray, ray_t).is_some())
    }
}

impl Hittable for Scene {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<Hit> {
        let mut closest: Option<Hit> = None;
        let mut closest_so_far = ray_t.max;

        for (index, mesh) in self.meshes.iter().enumerate() {
            if let Some(hit) = mesh.hit(ray, ray_t.with_max(closest_so_far)) {
                closest_so_far = hit.t;
                closest = Some(Hit { mesh: index, ..hit });
            }
        }

        closest
    }

    fn occluded(&self, ray: &Ray, ray_t: Interval) -> bool {
        self.meshes.iter().any(|mesh| mesh.occluded(ray, ray_t))
    }
}
