//! Camera pose: a position plus an orthonormal orientation basis.
//!
//! Orientation columns are the camera's right (+X), up (+Y) and back (+Z)
//! axes in world space; the camera looks down its local -Z axis.

use crt_math::{Mat3, Mat3Ext, Ray, Vec3};
use thiserror::Error;

use crate::scene::Settings;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CameraError {
    #[error("camera orientation columns are linearly dependent")]
    DegenerateOrientation,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    position: Vec3,
    orientation: Mat3,
}

impl Default for Camera {
    /// At the origin, aligned with the world axes.
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Mat3::IDENTITY,
        }
    }
}

impl Camera {
    /// Create a camera. The orientation is used as given (no silent
    /// re-orthonormalization) but must span 3D space.
    pub fn new(position: Vec3, orientation: Mat3) -> Result<Self, CameraError> {
        if orientation.orthogonalized().is_none() {
            return Err(CameraError::DegenerateOrientation);
        }
        Ok(Self {
            position,
            orientation,
        })
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn orientation(&self) -> Mat3 {
        self.orientation
    }

    /// Direction the camera looks at (-Z column).
    pub fn forward(&self) -> Vec3 {
        -self.orientation.z_axis.normalize()
    }

    pub fn right(&self) -> Vec3 {
        self.orientation.x_axis.normalize()
    }

    pub fn up(&self) -> Vec3 {
        self.orientation.y_axis.normalize()
    }

    /// Move along the view direction. Positive moves forward.
    pub fn dolly(&mut self, distance: f32) {
        self.position += self.forward() * distance;
    }

    /// Move sideways. Positive moves right.
    pub fn truck(&mut self, distance: f32) {
        self.position += self.right() * distance;
    }

    /// Move vertically. Positive moves up.
    pub fn pedestal(&mut self, distance: f32) {
        self.position += self.up() * distance;
    }

    /// Yaw about the camera's Y axis (radians, positive turns left).
    pub fn pan(&mut self, angle: f32) {
        self.rotate_locally(Mat3::from_rotation_y(angle));
    }

    /// Pitch about the camera's X axis (radians, positive looks up).
    pub fn tilt(&mut self, angle: f32) {
        self.rotate_locally(Mat3::from_rotation_x(angle));
    }

    /// Roll about the camera's Z axis (radians).
    pub fn roll(&mut self, angle: f32) {
        self.rotate_locally(Mat3::from_rotation_z(angle));
    }

    fn rotate_locally(&mut self, rotation: Mat3) {
        self.orientation = self.orientation.rotated_locally(rotation);
    }

    /// Re-orthonormalize the orientation after many incremental rotations.
    pub fn orthogonalize(&mut self) -> Result<(), CameraError> {
        self.orientation = self
            .orientation
            .orthogonalized()
            .ok_or(CameraError::DegenerateOrientation)?;
        Ok(())
    }

    /// Primary ray through the center of pixel `(x, y)`, with (0, 0) the
    /// top-left pixel. The image plane sits at distance 1 and spans [-1, 1]
    /// vertically (a 90 degree vertical field of view).
    pub fn ray_for_pixel(&self, x: u32, y: u32, settings: &Settings) -> Ray {
        let ndc_x = (x as f32 + 0.5) / settings.width as f32;
        let ndc_y = (y as f32 + 0.5) / settings.height as f32;

        let screen_x = (2.0 * ndc_x - 1.0) * settings.aspect_ratio();
        let screen_y = 1.0 - 2.0 * ndc_y;

        Ray::new(
            self.position,
            self.orientation * Vec3::new(screen_x, screen_y, -1.0),
        )
    }
}
