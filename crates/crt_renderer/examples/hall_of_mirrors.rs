//! Hall of mirrors example.
//!
//! Builds a small scene in code (a lit floor, a smooth-shaded pyramid and
//! two facing mirrors) and saves it as PPM.
//!
//! Run with: cargo run -p crt_renderer --release --example hall_of_mirrors

use crt_core::{Camera, Color, Material, Mesh, MeshError, PointLight, Scene, Settings};
use crt_renderer::{render, save_image, RenderConfig, Vec3};

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    println!("CRT - Hall of Mirrors Example");
    println!("=============================");

    let start = std::time::Instant::now();
    let scene = match build_scene() {
        Ok(scene) => scene,
        Err(e) => {
            eprintln!("Failed to build scene: {}", e);
            return;
        }
    };
    println!(
        "Scene built in {:?} ({} triangles)",
        start.elapsed(),
        scene.total_triangle_count()
    );

    let config = RenderConfig {
        max_depth: 8,
        ..RenderConfig::default()
    };

    let image = match render(&scene, &config) {
        Ok(image) => image,
        Err(e) => {
            eprintln!("Render failed: {}", e);
            return;
        }
    };

    let filename = "hall_of_mirrors.ppm";
    match save_image(&image, filename) {
        Ok(()) => println!("Saved to {}", filename),
        Err(e) => eprintln!("Failed to save image: {}", e),
    }
}

fn build_scene() -> Result<Scene, MeshError> {
    let mut camera = Camera::default();
    camera.pedestal(1.5);
    camera.dolly(-6.0);
    camera.tilt(-0.2);

    let mut scene = Scene::new(
        Settings::new(800, 450, Color::new(0.05, 0.05, 0.08)),
        camera,
    );

    let floor_mat = scene.add_material(Material::diffuse(Color::new(0.6, 0.6, 0.55)));
    let clay_mat = scene.add_material(
        Material::diffuse(Color::new(0.8, 0.3, 0.2)).with_smooth_shading(true),
    );
    let mirror_mat = scene.add_material(Material::reflective(Color::new(0.9, 0.9, 0.95)));

    // Floor
    scene.add_mesh(quad(
        [
            Vec3::new(-4.0, 0.0, 4.0),
            Vec3::new(4.0, 0.0, 4.0),
            Vec3::new(4.0, 0.0, -8.0),
            Vec3::new(-4.0, 0.0, -8.0),
        ],
        floor_mat,
    )?);

    // Mirrors on either side, facing each other
    scene.add_mesh(quad(
        [
            Vec3::new(-3.0, 0.0, 4.0),
            Vec3::new(-3.0, 0.0, -8.0),
            Vec3::new(-3.0, 4.0, -8.0),
            Vec3::new(-3.0, 4.0, 4.0),
        ],
        mirror_mat,
    )?);
    scene.add_mesh(quad(
        [
            Vec3::new(3.0, 0.0, -8.0),
            Vec3::new(3.0, 0.0, 4.0),
            Vec3::new(3.0, 4.0, 4.0),
            Vec3::new(3.0, 4.0, -8.0),
        ],
        mirror_mat,
    )?);

    // Pyramid in the middle
    let apex = Vec3::new(0.0, 1.8, -2.0);
    let base = [
        Vec3::new(-0.8, 0.0, -1.2),
        Vec3::new(0.8, 0.0, -1.2),
        Vec3::new(0.8, 0.0, -2.8),
        Vec3::new(-0.8, 0.0, -2.8),
    ];
    let mut positions = base.to_vec();
    positions.push(apex);
    scene.add_mesh(Mesh::new(
        positions,
        vec![[0, 1, 4], [1, 2, 4], [2, 3, 4], [3, 0, 4]],
        clay_mat,
    )?);

    scene.add_light(PointLight::new(Vec3::new(0.0, 3.5, 0.0), 600.0));
    scene.add_light(PointLight::new(Vec3::new(-1.5, 2.5, -5.0), 300.0));

    println!("Created {} meshes", scene.meshes.len());
    Ok(scene)
}

/// Two counter-clockwise triangles over four corners.
fn quad(corners: [Vec3; 4], material_index: usize) -> Result<Mesh, MeshError> {
    Mesh::new(corners.to_vec(), vec![[0, 1, 2], [0, 2, 3]], material_index)
}
