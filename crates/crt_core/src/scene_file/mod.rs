//! Scene file support for CRT.
//!
//! Scenes are stored as JSON documents (conventionally `.crtscene`) with five
//! top-level sections:
//!
//! - `settings`: background color and image resolution
//! - `camera`: position and a column-major 3x3 orientation matrix
//! - `lights`: point lights (`position`, `intensity`)
//! - `materials`: `diffuse` or `reflective`, with albedo and smooth shading flag
//! - `objects`: meshes as flat vertex and triangle-index arrays
//!
//! `settings` and `camera` are required; the other sections may be omitted.
//!
//! # Example
//!
//! ```ignore
//! use crt_core::scene_file::load_scene;
//!
//! let scene = load_scene("scenes/mirrors.crtscene")?;
//! println!("Loaded {} meshes, {} lights", scene.meshes.len(), scene.lights.len());
//! ```

mod loader;
mod types;

pub use loader::*;
pub use types::*;
