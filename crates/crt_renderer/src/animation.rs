//! Camera animation: a sequence of frames with the camera panning a fixed
//! angle between frames.
//!
//! Every pan composes another rotation into the camera orientation, so the
//! basis is re-orthonormalized every [`ORTHOGONALIZE_EVERY`] frames.

use std::path::{Path, PathBuf};

use crt_core::{Camera, CameraError, Scene};
use thiserror::Error;

use crate::output::{save_image, OutputError};
use crate::renderer::{render, RenderConfig, RenderError};

/// Frames between two camera re-orthonormalizations.
pub const ORTHOGONALIZE_EVERY: u32 = 10;

#[derive(Error, Debug)]
pub enum AnimationError {
    #[error("Animation needs at least one frame")]
    NoFrames,

    #[error("Frame {frame}: {source}")]
    Camera {
        frame: u32,
        #[source]
        source: CameraError,
    },

    #[error("Frame {frame}: {source}")]
    Render {
        frame: u32,
        #[source]
        source: RenderError,
    },

    #[error("Frame {frame}: {source}")]
    Output {
        frame: u32,
        #[source]
        source: OutputError,
    },
}

/// A camera turning in place about its own up axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Turntable {
    pub frames: u32,
    /// Pan applied between consecutive frames (radians, positive turns left)
    pub pan_per_frame: f32,
}

impl Turntable {
    pub fn new(frames: u32, pan_per_frame: f32) -> Self {
        Self {
            frames,
            pan_per_frame,
        }
    }

    /// Camera pose of every frame, starting from `start`.
    ///
    /// Frame 0 uses `start` unchanged. Each later frame pans once more, and
    /// frames whose index is a multiple of [`ORTHOGONALIZE_EVERY`] also
    /// re-orthonormalize the orientation.
    pub fn camera_poses(&self, start: Camera) -> Result<Vec<Camera>, AnimationError> {
        if self.frames == 0 {
            return Err(AnimationError::NoFrames);
        }

        let mut camera = start;
        let mut poses = Vec::with_capacity(self.frames as usize);
        poses.push(camera);

        for frame in 1..self.frames {
            camera.pan(self.pan_per_frame);
            if frame % ORTHOGONALIZE_EVERY == 0 {
                camera
                    .orthogonalize()
                    .map_err(|source| AnimationError::Camera { frame, source })?;
            }
            poses.push(camera);
        }

        Ok(poses)
    }

    /// Render every frame and save it next to `output` (see [`frame_path`]).
    ///
    /// The scene camera is moved for each frame and restored afterwards,
    /// also when a frame fails. Returns the written paths in frame order.
    pub fn render_to_files(
        &self,
        scene: &mut Scene,
        config: &RenderConfig,
        output: &Path,
    ) -> Result<Vec<PathBuf>, AnimationError> {
        let poses = self.camera_poses(scene.camera)?;
        let start = scene.camera;

        log::info!(
            "Rendering {} frames, panning {:.2} degrees per frame",
            self.frames,
            self.pan_per_frame.to_degrees()
        );

        let result = render_poses(scene, &poses, config, output);
        scene.camera = start;
        result
    }
}

fn render_poses(
    scene: &mut Scene,
    poses: &[Camera],
    config: &RenderConfig,
    output: &Path,
) -> Result<Vec<PathBuf>, AnimationError> {
    let frames = poses.len() as u32;
    let mut written = Vec::with_capacity(poses.len());

    for (frame, pose) in (0..frames).zip(poses) {
        scene.camera = *pose;

        let image = render(scene, config)
            .map_err(|source| AnimationError::Render { frame, source })?;

        let path = frame_path(output, frame, frames);
        save_image(&image, &path)
            .map_err(|source| AnimationError::Output { frame, source })?;

        log::debug!("Frame {}/{} saved", frame + 1, frames);
        written.push(path);
    }

    Ok(written)
}

/// Path of frame `frame` out of `frames`: `out.ppm` becomes `out_007.ppm`.
///
/// Frame numbers are zero-padded to at least three digits so the files sort
/// in frame order.
pub fn frame_path(output: &Path, frame: u32, frames: u32) -> PathBuf {
    let digits = frames.saturating_sub(1).to_string().len().max(3);
    let stem = output
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "frame".to_string());

    let mut name = format!("{stem}_{frame:0digits$}");
    if let Some(ext) = output.extension() {
        name.push('.');
        name.push_str(&ext.to_string_lossy());
    }
    output.with_file_name(name)
}
