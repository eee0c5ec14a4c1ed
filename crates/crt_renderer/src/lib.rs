//! CRT Renderer - CPU recursive ray tracing for triangle-mesh scenes.
//!
//! Casts one ray through each pixel center, finds the nearest triangle
//! across all meshes, and shades it with Lambertian point lights or perfect
//! mirror reflection. Buckets of pixels are rendered in parallel with rayon.
//! A [`Turntable`] renders a panning camera animation frame by frame.
//!
//! # Example
//!
//! ```ignore
//! use crt_renderer::{render, save_image, RenderConfig};
//!
//! let scene = crt_core::load_scene("scene.crtscene")?;
//! let image = render(&scene, &RenderConfig::default())?;
//! save_image(&image, "render.png")?;
//! ```

mod animation;
mod bucket;
mod hittable;
mod output;
mod renderer;
mod shading;
mod triangle;

pub use animation::{frame_path, AnimationError, Turntable, ORTHOGONALIZE_EVERY};
pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use hittable::{mesh_triangle, Hit, Hittable};
pub use output::{save_image, write_ppm, OutputError, OutputResult};
pub use renderer::{
    color_to_rgb, render, render_pixel, render_serial, render_with_cancel, trace, ImageBuffer,
    RenderConfig, RenderError, ShadingMode,
};
pub use shading::{barycentric, face_forward, lambert, shading_normal};
pub use triangle::{Triangle, TriangleError};

/// Re-export scene and math types used in the public API
pub use crt_core::{Color, Scene};
pub use crt_math::{Interval, Ray, Vec3};
