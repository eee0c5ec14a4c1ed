mod cli;

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use crt_renderer::{render, save_image};
use log::{info, LevelFilter};

use crate::cli::Args;

fn init_logger(level: LevelFilter) {
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_level.into());

    info!("CRT {}", env!("CARGO_PKG_VERSION"));

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to configure the render thread pool")?;
    }
    info!("Using {} render threads", rayon::current_num_threads());

    let start = Instant::now();
    let mut scene = crt_core::load_scene(&args.scene)
        .with_context(|| format!("Failed to load scene {}", args.scene.display()))?;
    info!("Scene loaded in {:.2?}", start.elapsed());

    let config = args.render_config();
    if let Some(turntable) = args.turntable() {
        let written = turntable
            .render_to_files(&mut scene, &config, &args.output)
            .context("Animation failed")?;
        info!("Wrote {} frames", written.len());
    } else {
        let image = render(&scene, &config).context("Render failed")?;
        save_image(&image, &args.output)
            .with_context(|| format!("Failed to write {}", args.output.display()))?;
    }

    info!("Done in {:.2?}", start.elapsed());
    Ok(())
}
