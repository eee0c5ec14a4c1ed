//! Scene description types for CRT.
//!
//! A [`Scene`] is assembled once, by the scene-file loader or by hand, and
//! is then treated as read-only by the renderer.

use crt_math::Vec3;
use thiserror::Error;

use crate::camera::Camera;
use crate::mesh::Mesh;

/// Color type alias (linear RGB, channels nominally in 0-1)
pub type Color = Vec3;

/// How a surface responds to light.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MaterialKind {
    /// Matte surface lit by the scene's point lights (Lambertian).
    #[default]
    Diffuse,
    /// Mirror surface that shows whatever the reflected ray sees.
    Reflective,
}

/// Surface description referenced by `Mesh::material_index`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub kind: MaterialKind,

    /// Per-channel reflectance
    pub albedo: Color,

    /// Interpolate vertex normals (true) or use the face normal (false)
    pub smooth_shading: bool,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            kind: MaterialKind::Diffuse,
            albedo: Color::splat(0.6),
            smooth_shading: false,
        }
    }
}

impl Material {
    pub fn new(kind: MaterialKind, albedo: Color, smooth_shading: bool) -> Self {
        Self {
            kind,
            albedo,
            smooth_shading,
        }
    }

    /// Flat-shaded diffuse material.
    pub fn diffuse(albedo: Color) -> Self {
        Self::new(MaterialKind::Diffuse, albedo, false)
    }

    /// Flat-shaded mirror tinted by `albedo`.
    pub fn reflective(albedo: Color) -> Self {
        Self::new(MaterialKind::Reflective, albedo, false)
    }

    pub fn with_smooth_shading(mut self, smooth_shading: bool) -> Self {
        self.smooth_shading = smooth_shading;
        self
    }
}

/// An isotropic point light.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub position: Vec3,

    /// Emitted power, in no particular unit
    pub intensity: f32,
}

impl PointLight {
    pub fn new(position: Vec3, intensity: f32) -> Self {
        Self {
            position,
            intensity,
        }
    }
}

/// Image resolution and background.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Settings {
    pub width: u32,
    pub height: u32,
    pub background: Color,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            background: Color::ZERO,
        }
    }
}

impl Settings {
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        Self {
            width,
            height,
            background,
        }
    }

    /// Width divided by height.
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Errors found when validating a scene before rendering.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("mesh {mesh} uses material {index}, but the scene has {count} materials")]
    MissingMaterial {
        mesh: usize,
        index: usize,
        count: usize,
    },

    #[error("mesh {mesh} was modified without recalculating its normals")]
    StaleNormals { mesh: usize },

    #[error("image resolution must be non-zero, got {width}x{height}")]
    InvalidResolution { width: u32, height: u32 },
}

/// Result type for scene validation.
pub type SceneResult<T> = Result<T, SceneError>;

/// Everything the renderer needs: geometry, materials, lights, and a view.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    pub meshes: Vec<Mesh>,

    /// Indexed by `Mesh::material_index`
    pub materials: Vec<Material>,

    pub lights: Vec<PointLight>,

    pub camera: Camera,

    pub settings: Settings,
}

impl Scene {
    /// Create an empty scene.
    pub fn new(settings: Settings, camera: Camera) -> Self {
        Self {
            settings,
            camera,
            ..Default::default()
        }
    }

    /// Add a mesh and return its index.
    pub fn add_mesh(&mut self, mesh: Mesh) -> usize {
        self.meshes.push(mesh);
        self.meshes.len() - 1
    }

    /// Add a material and return its index.
    pub fn add_material(&mut self, material: Material) -> usize {
        self.materials.push(material);
        self.materials.len() - 1
    }

    pub fn add_light(&mut self, light: PointLight) {
        self.lights.push(light);
    }

    /// Material of mesh `mesh`.
    ///
    /// # Panics
    ///
    /// Panics on an out-of-range mesh or material index; `validate` rules
    /// the latter out.
    pub fn material_of(&self, mesh: usize) -> &Material {
        &self.materials[self.meshes[mesh].material_index()]
    }

    /// Get total triangle count across all meshes.
    pub fn total_triangle_count(&self) -> usize {
        self.meshes.iter().map(Mesh::triangle_count).sum()
    }

    /// Check the cross-references the renderer relies on.
    ///
    /// Suspicious but renderable data (no lights, albedo outside 0-1) is
    /// logged rather than rejected.
    pub fn validate(&self) -> SceneResult<()> {
        let Settings { width, height, .. } = self.settings;
        if width == 0 || height == 0 {
            return Err(SceneError::InvalidResolution { width, height });
        }

        for (i, mesh) in self.meshes.iter().enumerate() {
            if mesh.material_index() >= self.materials.len() {
                return Err(SceneError::MissingMaterial {
                    mesh: i,
                    index: mesh.material_index(),
                    count: self.materials.len(),
                });
            }
            if mesh.normals_dirty() {
                return Err(SceneError::StaleNormals { mesh: i });
            }
        }

        for (i, material) in self.materials.iter().enumerate() {
            let albedo = material.albedo;
            if albedo.min_element() < 0.0 || albedo.max_element() > 1.0 {
                log::warn!("Material {} has albedo {} outside [0, 1]", i, albedo);
            }
        }

        let diffuse_in_use = self
            .meshes
            .iter()
            .any(|m| self.materials[m.material_index()].kind == MaterialKind::Diffuse);
        if diffuse_in_use && self.lights.is_empty() {
            log::warn!("Scene has diffuse surfaces but no lights; they will render black");
        }

        Ok(())
    }
}
