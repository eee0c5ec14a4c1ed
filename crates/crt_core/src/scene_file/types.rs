//! Serialized scene document types.
//!
//! These mirror the JSON layout one-to-one; conversion into scene types
//! (and all cross-field validation) happens in the loader.

use serde::{Deserialize, Serialize};

/// Top-level scene document.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SceneDocument {
    pub settings: SettingsDoc,

    pub camera: CameraDoc,

    #[serde(default)]
    pub lights: Vec<LightDoc>,

    #[serde(default)]
    pub materials: Vec<MaterialDoc>,

    #[serde(default)]
    pub objects: Vec<ObjectDoc>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SettingsDoc {
    pub background_color: [f32; 3],
    pub image_settings: ImageSettingsDoc,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ImageSettingsDoc {
    pub width: u32,
    pub height: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CameraDoc {
    pub position: [f32; 3],

    /// Orientation, column-major
    pub matrix: [f32; 9],
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LightDoc {
    pub position: [f32; 3],
    pub intensity: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialTypeDoc {
    Diffuse,
    Reflective,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MaterialDoc {
    #[serde(rename = "type")]
    pub kind: MaterialTypeDoc,
    pub albedo: [f32; 3],
    pub smooth_shading: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ObjectDoc {
    pub material_index: usize,

    /// x, y, z triples
    pub vertices: Vec<f32>,

    /// Vertex index triples, counter-clockwise
    pub triangles: Vec<u32>,
}
