// Basis utilities for Mat3
//
// Extends glam::Mat3 with the two operations camera orientation needs:
// drift repair and rotations expressed in the basis' own frame.

use glam::{Mat3, Vec3};

/// Extension trait for Mat3 orientation bases (columns = right, up, -forward).
pub trait Mat3Ext {
    /// Gram-Schmidt on the columns, then per-column normalization.
    ///
    /// Returns `None` if the columns are linearly dependent (or contain a
    /// zero column), since no orthonormal basis can be recovered from them.
    fn orthogonalized(&self) -> Option<Mat3>;

    /// Rotate the basis about its own axes.
    ///
    /// For an orthonormal basis this equals `(self * rotation * selfᵀ) * self`:
    /// the rotation expressed in the local frame, pulled back into world space
    /// and applied to the basis. Computed as `self * rotation`, which keeps the
    /// current orientation and does not amplify drift in `self`. Swapping the
    /// operands rotates about world axes instead.
    fn rotated_locally(&self, rotation: Mat3) -> Mat3;
}

impl Mat3Ext for Mat3 {
    fn orthogonalized(&self) -> Option<Mat3> {
        let c0 = self.x_axis.try_normalize()?;
        let c1 = reject(self.y_axis, c0).try_normalize()?;
        let c2 = reject(reject(self.z_axis, c0), c1).try_normalize()?;
        Some(Mat3::from_cols(c0, c1, c2))
    }

    fn rotated_locally(&self, rotation: Mat3) -> Mat3 {
        *self * rotation
    }
}

/// Remove the component of `v` along the unit vector `axis`.
#[inline]
fn reject(v: Vec3, axis: Vec3) -> Vec3 {
    v - v.dot(axis) * axis
}
