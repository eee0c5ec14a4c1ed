// Re-export glam for convenience
pub use glam::*;

// CRT math types
mod basis;
mod interval;
mod ray;

pub use basis::Mat3Ext;
pub use interval::Interval;
pub use ray::{reflect, Ray};

/// Threshold below which a ray is considered parallel to a triangle's plane,
/// and the tolerance used when accepting hits at the ray origin.
pub const EPSILON: f32 = 1e-7;
