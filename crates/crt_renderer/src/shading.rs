//! Local shading: normal selection, Lambertian point lights, and the
//! barycentric debug view.

use crate::hittable::{Hit, Hittable};
use crate::renderer::RenderConfig;
use crt_core::{Color, Mesh, Scene};
use crt_math::{Interval, Ray, Vec3};
use std::f32::consts::PI;

/// Normal used for shading a hit on `mesh`.
///
/// Smooth shading blends the triangle's vertex normals with the hit's
/// barycentric weights (`w` for vertex 0, `u` for vertex 1, `v` for
/// vertex 2). Flat shading, or a blend that cancels out, uses the face normal.
pub fn shading_normal(mesh: &Mesh, hit: &Hit, smooth: bool) -> Vec3 {
    if !smooth {
        return hit.normal;
    }

    let [n0, n1, n2] = mesh.triangle_vertex_normals(hit.triangle);
    (n0 * hit.w + n1 * hit.u + n2 * hit.v)
        .try_normalize()
        .unwrap_or(hit.normal)
}

/// Flip `normal` to the side the ray arrived from.
///
/// Triangles are hit from both sides, so the stored face normal may point
/// away from the viewer. The face normal decides which side was hit, which
/// keeps smooth normals near silhouettes consistent with the geometry.
#[inline]
pub fn face_forward(normal: Vec3, face_normal: Vec3, direction: Vec3) -> Vec3 {
    if direction.dot(face_normal) > 0.0 {
        -normal
    } else {
        normal
    }
}

/// Sum of the unoccluded contributions of every point light at `point`.
///
/// Each light contributes `intensity * albedo * cos / (4 pi r^2)`, where
/// `cos` is clamped at zero and `r` is the distance to the light.
pub fn lambert(
    scene: &Scene,
    point: Vec3,
    normal: Vec3,
    albedo: Color,
    config: &RenderConfig,
) -> Color {
    let mut color = Color::ZERO;

    for light in &scene.lights {
        let to_light = light.position - point;
        let distance = to_light.length();
        // A light on the surface lights nothing
        if distance < config.epsilon {
            continue;
        }
        let light_dir = to_light / distance;

        let cos = light_dir.dot(normal).max(0.0);
        if cos == 0.0 {
            continue;
        }

        let shadow_ray = Ray::new(point + normal * config.shadow_bias, light_dir);
        let shadow_t = if config.clamp_shadow_rays {
            Interval::new(-config.epsilon, distance)
        } else {
            Interval::forward(config.epsilon)
        };
        if scene.occluded(&shadow_ray, shadow_t) {
            continue;
        }

        let sphere_area = 4.0 * PI * distance * distance;
        color += albedo * (light.intensity * cos / sphere_area);
    }

    color
}

/// Barycentric weights `(u, v, w)` as an RGB color.
pub fn barycentric(hit: &Hit, tolerance: f32) -> Color {
    let sum = hit.u + hit.v + hit.w;
    debug_assert!(
        (sum - 1.0).abs() < tolerance,
        "barycentric weights sum to {sum}"
    );
    if (sum - 1.0).abs() >= tolerance {
        log::warn!("Barycentric weights sum to {} at {}", sum, hit.p);
    }
    Color::new(hit.u, hit.v, hit.w)
}
