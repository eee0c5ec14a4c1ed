use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use crt_renderer::{RenderConfig, ShadingMode, Turntable, DEFAULT_BUCKET_SIZE};
use log::LevelFilter;

/// Log levels accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shading {
    /// Materials, lights, shadows and reflections
    Light,
    /// Barycentric coordinates as colors (debug)
    Barycentric,
}

impl From<Shading> for ShadingMode {
    fn from(shading: Shading) -> Self {
        match shading {
            Shading::Light => ShadingMode::Light,
            Shading::Barycentric => ShadingMode::Barycentric,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "crt")]
#[command(about = "Render a triangle-mesh scene file with a recursive ray tracer")]
#[command(version)]
pub struct Args {
    /// Scene file (JSON)
    pub scene: PathBuf,

    /// Output image (.ppm or .png)
    #[arg(short, long, default_value = "output.ppm")]
    pub output: PathBuf,

    #[arg(long, value_enum, default_value = "light")]
    pub shading: Shading,

    /// Maximum number of ray generations (camera ray plus reflections)
    #[arg(long, default_value_t = 4)]
    pub max_depth: u32,

    /// Edge length of render buckets in pixels
    #[arg(
        long,
        default_value_t = DEFAULT_BUCKET_SIZE,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub bucket_size: u32,

    /// Worker threads (defaults to one per core)
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,

    /// Let shadow rays be blocked by geometry beyond the light
    #[arg(long)]
    pub no_shadow_clamp: bool,

    /// Render a panning animation of this many frames (out.ppm becomes out_000.ppm, ...)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub frames: Option<u32>,

    /// Camera pan between animation frames, in degrees
    #[arg(long, default_value_t = 5.0, requires = "frames", allow_negative_numbers = true)]
    pub pan_deg: f32,

    /// Overridden per module by RUST_LOG
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

impl Args {
    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            shading: self.shading.into(),
            max_depth: self.max_depth,
            clamp_shadow_rays: !self.no_shadow_clamp,
            bucket_size: self.bucket_size,
            ..RenderConfig::default()
        }
    }

    pub fn turntable(&self) -> Option<Turntable> {
        self.frames.map(|frames| Turntable::new(frames, self.pan_deg.to_radians()))
    }
}
