//! Example: Load and inspect a scene file.
//!
//! Run with: cargo run -p crt_core --example load_scene -- scenes/triangle.crtscene

use std::env;

use crt_core::load_scene;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("Usage: load_scene <path-to-scene-file>");
        println!("\nExample:");
        println!("  cargo run -p crt_core --example load_scene -- scenes/triangle.crtscene");
        return;
    }

    let path = &args[1];
    println!("Loading scene file: {}", path);

    match load_scene(path) {
        Ok(scene) => {
            let settings = &scene.settings;
            println!("\n=== Scene ===");
            println!(
                "Resolution: {}x{} (aspect {:.3})",
                settings.width,
                settings.height,
                settings.aspect_ratio()
            );
            println!(
                "Background: ({:.2}, {:.2}, {:.2})",
                settings.background.x, settings.background.y, settings.background.z
            );
            println!("Total triangles: {}", scene.total_triangle_count());

            let camera = &scene.camera;
            let pos = camera.position();
            let fwd = camera.forward();
            println!("\n--- Camera ---");
            println!("  Position: ({:.2}, {:.2}, {:.2})", pos.x, pos.y, pos.z);
            println!("  Forward:  ({:.2}, {:.2}, {:.2})", fwd.x, fwd.y, fwd.z);

            println!("\n--- Materials ---");
            for (i, material) in scene.materials.iter().enumerate() {
                println!(
                    "  [{}] {:?} albedo ({:.2}, {:.2}, {:.2}){}",
                    i,
                    material.kind,
                    material.albedo.x,
                    material.albedo.y,
                    material.albedo.z,
                    if material.smooth_shading { " smooth" } else { "" }
                );
            }

            println!("\n--- Meshes ---");
            for (i, mesh) in scene.meshes.iter().enumerate() {
                println!(
                    "  [{}] {} vertices, {} triangles, material {}",
                    i,
                    mesh.vertex_count(),
                    mesh.triangle_count(),
                    mesh.material_index()
                );
            }

            println!("\n--- Lights ---");
            for (i, light) in scene.lights.iter().enumerate() {
                println!(
                    "  [{}] ({:.2}, {:.2}, {:.2}) intensity {}",
                    i, light.position.x, light.position.y, light.position.z, light.intensity
                );
            }
        }
        Err(e) => {
            eprintln!("Error loading scene file: {}", e);
        }
    }
}
