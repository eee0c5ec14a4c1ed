//! High-level scene loading.
//!
//! Reads a JSON scene document and converts it into a validated [`Scene`].
//! Every structural problem is reported before any rendering starts.

use std::path::Path;

use crt_math::{Mat3, Vec3};
use thiserror::Error;

use crate::camera::{Camera, CameraError};
use crate::mesh::{Mesh, MeshError, TriIndices};
use crate::scene::{Material, MaterialKind, PointLight, Scene, SceneError, Settings};
use crate::scene_file::types::{MaterialTypeDoc, ObjectDoc, SceneDocument};

/// Errors that can occur during scene loading.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed scene document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Object {object}: `{field}` has {len} entries, expected a multiple of 3")]
    InvalidLength {
        object: usize,
        field: &'static str,
        len: usize,
    },

    #[error("Camera error: {0}")]
    Camera(#[from] CameraError),

    #[error("Object {object}: {source}")]
    Mesh {
        object: usize,
        #[source]
        source: MeshError,
    },

    #[error("Invalid scene: {0}")]
    Scene(#[from] SceneError),
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Load a scene file from disk.
pub fn load_scene<P: AsRef<Path>>(path: P) -> LoadResult<Scene> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)?;

    log::info!("Loading scene from {}", path.display());
    load_scene_from_str(&contents)
}

/// Load a scene from a JSON string.
pub fn load_scene_from_str(contents: &str) -> LoadResult<Scene> {
    let document: SceneDocument = serde_json::from_str(contents)?;
    let scene = document.into_scene()?;

    log::info!(
        "Loaded scene: {}x{}, {} meshes ({} triangles), {} materials, {} lights",
        scene.settings.width,
        scene.settings.height,
        scene.meshes.len(),
        scene.total_triangle_count(),
        scene.materials.len(),
        scene.lights.len()
    );

    Ok(scene)
}

impl SceneDocument {
    /// Convert the parsed document into a validated scene.
    pub fn into_scene(self) -> LoadResult<Scene> {
        let image = self.settings.image_settings;
        let settings = Settings::new(
            image.width,
            image.height,
            Vec3::from_array(self.settings.background_color),
        );

        let camera = Camera::new(
            Vec3::from_array(self.camera.position),
            Mat3::from_cols_array(&self.camera.matrix),
        )?;

        let mut scene = Scene::new(settings, camera);

        for light in &self.lights {
            scene.add_light(PointLight::new(
                Vec3::from_array(light.position),
                light.intensity,
            ));
        }

        for material in &self.materials {
            let kind = match material.kind {
                MaterialTypeDoc::Diffuse => MaterialKind::Diffuse,
                MaterialTypeDoc::Reflective => MaterialKind::Reflective,
            };
            scene.add_material(Material::new(
                kind,
                Vec3::from_array(material.albedo),
                material.smooth_shading,
            ));
        }

        for (i, object) in self.objects.into_iter().enumerate() {
            let mesh = build_mesh(i, object)?;
            log::debug!(
                "Object {}: {} vertices, {} triangles, material {}",
                i,
                mesh.vertex_count(),
                mesh.triangle_count(),
                mesh.material_index()
            );
            scene.add_mesh(mesh);
        }

        scene.validate()?;
        Ok(scene)
    }
}

fn build_mesh(object: usize, doc: ObjectDoc) -> LoadResult<Mesh> {
    check_triples(object, "vertices", doc.vertices.len())?;
    check_triples(object, "triangles", doc.triangles.len())?;

    let positions: Vec<Vec3> = doc.vertices.chunks_exact(3).map(Vec3::from_slice).collect();
    let triangles: Vec<TriIndices> = doc
        .triangles
        .chunks_exact(3)
        .map(|t| [t[0], t[1], t[2]])
        .collect();

    Mesh::new(positions, triangles, doc.material_index)
        .map_err(|source| LoadError::Mesh { object, source })
}

fn check_triples(object: usize, field: &'static str, len: usize) -> LoadResult<()> {
    if len % 3 != 0 {
        return Err(LoadError::InvalidLength { object, field, len });
    }
    Ok(())
}
