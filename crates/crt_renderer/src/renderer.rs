//! Core recursive ray tracer.
//!
//! Implements Whitted-style tracing with:
//! - Nearest-hit search over every mesh in the scene
//! - Lambertian point-light shading with shadow rays
//! - Perfect mirror reflection up to a fixed depth
//! - A barycentric debug view
//!
//! Rendering is deterministic: one ray through each pixel center.

use crate::bucket::{generate_buckets, render_bucket, BucketResult};
use crate::hittable::Hittable;
use crate::shading::{barycentric, face_forward, lambert, shading_normal};
use crt_core::{Color, MaterialKind, Scene, SceneError};
use crt_math::{Interval, Ray, EPSILON};
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use thiserror::Error;

/// What a hit contributes to the image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ShadingMode {
    /// Materials and lights
    #[default]
    Light,
    /// Barycentric weights `(u, v, w)` as RGB, ignoring materials and lights
    Barycentric,
}

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub shading: ShadingMode,
    /// Number of ray generations; rays at this depth see the background
    pub max_depth: u32,
    /// How far behind a ray's origin a hit is still accepted
    pub epsilon: f32,
    /// Offset along the normal for shadow ray origins
    pub shadow_bias: f32,
    /// Offset along the normal for reflected ray origins
    pub reflection_bias: f32,
    /// Allowed deviation of `u + v + w` from 1 in barycentric mode
    pub barycentric_tolerance: f32,
    /// Ignore occluders farther away than the light
    pub clamp_shadow_rays: bool,
    /// Edge length of a render bucket in pixels
    pub bucket_size: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            shading: ShadingMode::Light,
            max_depth: 4,
            epsilon: EPSILON,
            shadow_bias: 1e-3,
            reflection_bias: 1e-3,
            barycentric_tolerance: 1e-5,
            clamp_shadow_rays: true,
            bucket_size: crate::bucket::DEFAULT_BUCKET_SIZE,
        }
    }
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Scene cannot be rendered: {0}")]
    Scene(#[from] SceneError),

    #[error("Render was cancelled")]
    Cancelled,
}

/// Compute the color seen by a ray.
///
/// `depth` counts the reflections that led to this ray; camera rays start
/// at 0. A ray at `config.max_depth` or one that hits nothing returns the
/// background color.
pub fn trace(ray: &Ray, scene: &Scene, depth: u32, config: &RenderConfig) -> Color {
    let background = scene.settings.background;
    if depth >= config.max_depth {
        return background;
    }

    let Some(hit) = scene.hit(ray, Interval::forward(config.epsilon)) else {
        return background;
    };

    match config.shading {
        ShadingMode::Barycentric => barycentric(&hit, config.barycentric_tolerance),
        ShadingMode::Light => {
            let material = scene.material_of(hit.mesh);
            let mesh = &scene.meshes[hit.mesh];
            let normal = face_forward(
                shading_normal(mesh, &hit, material.smooth_shading),
                hit.normal,
                ray.direction(),
            );

            match material.kind {
                MaterialKind::Diffuse => lambert(scene, hit.p, normal, material.albedo, config),
                MaterialKind::Reflective => {
                    let reflected =
                        Ray::reflected(ray.direction(), hit.p, normal, config.reflection_bias);
                    trace(&reflected, scene, depth + 1, config) * material.albedo
                }
            }
        }
    }
}

/// Render a single pixel.
pub fn render_pixel(scene: &Scene, x: u32, y: u32, config: &RenderConfig) -> Color {
    let ray = scene.camera.ray_for_pixel(x, y, &scene.settings);
    trace(&ray, scene, 0, config)
}

/// Convert a linear color to 8-bit RGB: each channel is scaled by 255,
/// truncated, and clamped. No gamma is applied.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    const CHANNEL: Interval = Interval::new(0.0, 255.0);
    let channel = |c: f32| CHANNEL.clamp((c * 255.0).trunc()) as u8;
    [channel(color.x), channel(color.y), channel(color.z)]
}

/// Simple image buffer for storing render output.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    /// Row-major, top row first
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    /// Copy a rendered bucket into place.
    pub fn blit(&mut self, result: &BucketResult) {
        let bucket = &result.bucket;
        for (row, chunk) in result
            .pixels
            .chunks_exact(bucket.width as usize)
            .enumerate()
        {
            let start = self.index(bucket.x, bucket.y + row as u32);
            self.pixels[start..start + chunk.len()].copy_from_slice(chunk);
        }
    }

    /// Convert to packed RGB bytes (for saving).
    pub fn to_rgb(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgb(*color));
        }
        bytes
    }
}

/// Render the entire scene to an image buffer, in parallel.
pub fn render(scene: &Scene, config: &RenderConfig) -> Result<ImageBuffer, RenderError> {
    render_with_cancel(scene, config, &AtomicBool::new(false))
}

/// Like [`render`], but stops early once `cancel` is set.
///
/// The flag is checked before each bucket starts; a cancelled render
/// returns [`RenderError::Cancelled`] and no image.
pub fn render_with_cancel(
    scene: &Scene,
    config: &RenderConfig,
    cancel: &AtomicBool,
) -> Result<ImageBuffer, RenderError> {
    scene.validate()?;

    let settings = &scene.settings;
    let buckets = generate_buckets(settings.width, settings.height, config.bucket_size.max(1));
    let total = buckets.len();

    log::info!(
        "Rendering {}x{} in {} buckets ({:?} shading, max depth {})",
        settings.width,
        settings.height,
        total,
        config.shading,
        config.max_depth
    );
    let start = Instant::now();

    let results: Option<Vec<BucketResult>> = buckets
        .into_par_iter()
        .map(|bucket| {
            if cancel.load(Ordering::Relaxed) {
                return None;
            }
            let pixels = render_bucket(&bucket, scene, config);
            log::debug!("Bucket {}/{} done", bucket.index + 1, total);
            Some(BucketResult::new(bucket, pixels))
        })
        .collect();

    let Some(results) = results else {
        log::info!("Render cancelled after {:.2?}", start.elapsed());
        return Err(RenderError::Cancelled);
    };

    let mut image = ImageBuffer::new(settings.width, settings.height);
    for result in &results {
        image.blit(result);
    }

    log::info!("Rendered in {:.2?}", start.elapsed());
    Ok(image)
}

/// Render the entire scene on the calling thread, row by row.
pub fn render_serial(scene: &Scene, config: &RenderConfig) -> Result<ImageBuffer, RenderError> {
    scene.validate()?;

    let mut image = ImageBuffer::new(scene.settings.width, scene.settings.height);
    for y in 0..image.height {
        for x in 0..image.width {
            image.set(x, y, render_pixel(scene, x, y, config));
        }
    }

    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crt_core::{Camera, Material, Mesh, PointLight, Settings};
    use crt_math::Vec3;
    use std::f32::consts::PI;

    const BACKGROUND: Color = Color::new(0.1, 0.2, 0.3);

    fn scene(width: u32, height: u32) -> Scene {
        Scene::new(Settings::new(width, height, BACKGROUND), Camera::default())
    }

    /// The reference triangle facing the default camera at z = -3.
    fn front_triangle(material_index: usize) -> Mesh {
        Mesh::new(
            vec![
                Vec3::new(-1.75, -1.75, -3.0),
                Vec3::new(1.75, -1.75, -3.0),
                Vec3::new(0.0, 1.75, -3.0),
            ],
            vec![[0, 1, 2]],
            material_index,
        )
        .unwrap()
    }

    /// Large triangle in the plane z = `z`, facing +Z or -Z.
    fn wall(z: f32, facing_positive_z: bool, material_index: usize) -> Mesh {
        let (a, b) = (Vec3::new(10.0, -10.0, z), Vec3::new(0.0, 10.0, z));
        let corner = Vec3::new(-10.0, -10.0, z);
        let triangle = if facing_positive_z {
            [corner, a, b]
        } else {
            [corner, b, a]
        };
        Mesh::new(triangle.to_vec(), vec![[0, 1, 2]], material_index).unwrap()
    }

    fn center_ray() -> Ray {
        Ray::new(Vec3::ZERO, Vec3::NEG_Z)
    }

    #[test]
    fn test_single_triangle_covers_center_only() {
        let mut scene = scene(31, 31);
        let mat = scene.add_material(Material::diffuse(Color::ONE));
        scene.add_mesh(front_triangle(mat));
        scene.add_light(PointLight::new(Vec3::new(0.0, 0.0, -1.0), 100.0));

        let image = render(&scene, &RenderConfig::default()).unwrap();

        assert_ne!(image.get(15, 15), BACKGROUND);
        for (x, y) in [(0, 0), (30, 0), (0, 30), (30, 30)] {
            assert_eq!(image.get(x, y), BACKGROUND, "corner ({x}, {y})");
        }
    }

    #[test]
    fn test_brightness_grows_with_intensity() {
        let config = RenderConfig::default();
        let centroid = Vec3::new(0.0, -1.75 / 3.0, -3.0);

        let mut previous = -1.0;
        for intensity in [10.0, 50.0, 200.0, 1000.0] {
            let mut scene = scene(1, 1);
            let mat = scene.add_material(Material::diffuse(Color::splat(0.5)));
            scene.add_mesh(front_triangle(mat));
            scene.add_light(PointLight::new(centroid + Vec3::Z * 2.0, intensity));

            let color = trace(&center_ray(), &scene, 0, &config);
            assert!(color.x > previous, "{} <= {}", color.x, previous);
            previous = color.x;
        }
    }

    #[test]
    fn test_light_behind_surface_is_dark() {
        let centroid = Vec3::new(0.0, -1.75 / 3.0, -3.0);
        let mut scene = scene(1, 1);
        let mat = scene.add_material(Material::diffuse(Color::ONE));
        scene.add_mesh(front_triangle(mat));
        scene.add_light(PointLight::new(centroid - Vec3::Z * 2.0, 1000.0));

        let color = trace(&center_ray(), &scene, 0, &RenderConfig::default());
        assert!(color.length() < 1e-6);
    }

    #[test]
    fn test_mirror_shows_tinted_diffuse_surface() {
        let config = RenderConfig::default();
        let mirror_albedo = Color::new(0.9, 0.5, 0.25);
        let diffuse_albedo = Color::new(0.8, 0.6, 0.4);

        let mut scene = scene(1, 1);
        let mirror = scene.add_material(Material::reflective(mirror_albedo));
        let matte = scene.add_material(Material::diffuse(diffuse_albedo));
        scene.add_mesh(wall(-5.0, true, mirror));
        scene.add_mesh(wall(5.0, false, matte));
        scene.add_light(PointLight::new(Vec3::new(0.0, 0.0, 3.0), 100.0));

        let color = trace(&center_ray(), &scene, 0, &config);

        // The reflected ray lands on the matte wall at (0, 0, 5), 2 units
        // from the light, facing it head on
        let direct = diffuse_albedo * (100.0 / (4.0 * PI * 4.0));
        let expected = direct * mirror_albedo;
        assert!((color - expected).length() < 1e-4, "{color} != {expected}");
    }

    #[test]
    fn test_hall_of_mirrors_terminates_at_max_depth() {
        let mut scene = scene(1, 1);
        let mirror = scene.add_material(Material::reflective(Color::splat(0.5)));
        scene.add_mesh(wall(-2.0, true, mirror));
        scene.add_mesh(wall(2.0, false, mirror));

        for max_depth in [1, 2, 4, 8] {
            let config = RenderConfig {
                max_depth,
                ..RenderConfig::default()
            };
            let color = trace(&center_ray(), &scene, 0, &config);
            let expected = BACKGROUND * 0.5f32.powi(max_depth as i32);
            assert!((color - expected).length() < 1e-6, "depth {max_depth}: {color}");
        }
    }

    #[test]
    fn test_zero_max_depth_sees_background() {
        let mut scene = scene(1, 1);
        let mat = scene.add_material(Material::default());
        scene.add_mesh(front_triangle(mat));

        let config = RenderConfig {
            max_depth: 0,
            ..RenderConfig::default()
        };
        assert_eq!(trace(&center_ray(), &scene, 0, &config), BACKGROUND);
    }

    #[test]
    fn test_barycentric_mode_ignores_lights() {
        let mut scene = scene(1, 1);
        let mat = scene.add_material(Material::diffuse(Color::ZERO));
        scene.add_mesh(front_triangle(mat));

        let config = RenderConfig {
            shading: ShadingMode::Barycentric,
            ..RenderConfig::default()
        };
        let color = trace(&center_ray(), &scene, 0, &config);

        assert!((color.x + color.y + color.z - 1.0).abs() < 1e-5);
        // Halfway up the triangle, midway between its left and right edges
        assert!((color - Color::new(0.25, 0.5, 0.25)).length() < 1e-5);
    }

    #[test]
    fn test_parallel_matches_serial() {
        let mut scene = scene(50, 37);
        let matte = scene.add_material(Material::diffuse(Color::new(0.7, 0.4, 0.2)));
        let mirror = scene.add_material(Material::reflective(Color::splat(0.8)));
        scene.add_mesh(front_triangle(matte));
        scene.add_mesh(wall(-6.0, true, mirror));
        scene.add_light(PointLight::new(Vec3::new(1.0, 2.0, -1.0), 300.0));

        let config = RenderConfig {
            bucket_size: 16,
            ..RenderConfig::default()
        };
        let parallel = render(&scene, &config).unwrap();
        let serial = render_serial(&scene, &config).unwrap();

        assert_eq!(parallel, serial);
    }

    #[test]
    fn test_cancelled_render_returns_error() {
        let mut scene = scene(64, 64);
        let mat = scene.add_material(Material::default());
        scene.add_mesh(front_triangle(mat));

        let cancel = AtomicBool::new(true);
        let result = render_with_cancel(&scene, &RenderConfig::default(), &cancel);
        assert!(matches!(result, Err(RenderError::Cancelled)));
    }

    #[test]
    fn test_invalid_scene_is_rejected_before_rendering() {
        let mut scene = scene(4, 4);
        scene.add_mesh(front_triangle(2));

        let result = render(&scene, &RenderConfig::default());
        assert!(matches!(
            result,
            Err(RenderError::Scene(SceneError::MissingMaterial { .. }))
        ));
    }

    #[test]
    fn test_empty_scene_is_background() {
        let scene = scene(3, 2);
        let image = render(&scene, &RenderConfig::default()).unwrap();

        assert!(image.pixels.iter().all(|&c| c == BACKGROUND));
    }

    #[test]
    fn test_color_to_rgb_truncates_and_clamps() {
        assert_eq!(color_to_rgb(Color::new(0.0, 1.0, 0.5)), [0, 255, 127]);
        assert_eq!(color_to_rgb(Color::new(-0.5, 7.0, 0.999)), [0, 255, 254]);
    }

    #[test]
    fn test_image_buffer_blit() {
        use crate::bucket::Bucket;

        let mut image = ImageBuffer::new(4, 3);
        let bucket = Bucket::new(2, 1, 2, 2, 0);
        let pixels = vec![Color::X, Color::Y, Color::Z, Color::ONE];
        image.blit(&BucketResult::new(bucket, pixels));

        assert_eq!(image.get(2, 1), Color::X);
        assert_eq!(image.get(3, 1), Color::Y);
        assert_eq!(image.get(2, 2), Color::Z);
        assert_eq!(image.get(3, 2), Color::ONE);
        assert_eq!(image.get(1, 1), Color::ZERO);
    }
}
