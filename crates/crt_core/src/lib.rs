//! CRT Core - Scene data and scene-file loading for the CRT ray tracer.
//!
//! This crate provides:
//!
//! - **Scene types**: `Scene`, `Mesh`, `Material`, `PointLight`, `Camera`, `Settings`
//! - **Scene files**: JSON scene document parsing and validation
//!
//! # Example
//!
//! ```ignore
//! use crt_core::load_scene;
//!
//! let scene = load_scene("scene.crtscene")?;
//! println!("Loaded {} meshes, {} triangles",
//!     scene.meshes.len(),
//!     scene.total_triangle_count());
//! ```

pub mod camera;
pub mod mesh;
pub mod scene;
pub mod scene_file;

// Re-export commonly used types
pub use camera::{Camera, CameraError};
pub use mesh::{Mesh, MeshError, MeshResult, TriIndices};
pub use scene::{
    Color, Material, MaterialKind, PointLight, Scene, SceneError, SceneResult, Settings,
};
pub use scene_file::{load_scene, load_scene_from_str, LoadError, LoadResult};
