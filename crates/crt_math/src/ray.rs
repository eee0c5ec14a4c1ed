use crate::Vec3;

/// A ray in 3D space with an origin and a unit-length direction.
///
/// The direction is normalized once at construction, so `at(t)` measures
/// `t` in world units. Only the non-negative half (`t >= 0`) is meaningful.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    origin: Vec3,
    direction: Vec3,
}

impl Ray {
    /// Create a new ray, normalizing `direction`.
    ///
    /// # Panics
    ///
    /// Panics if `direction` has (near) zero length or is not finite. A ray
    /// without a direction is a broken precondition, not a recoverable state.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        match Self::try_new(origin, direction) {
            Some(ray) => ray,
            None => panic!("ray direction must be a non-zero finite vector, got {direction}"),
        }
    }

    /// Create a new ray, or `None` if `direction` cannot be normalized.
    pub fn try_new(origin: Vec3, direction: Vec3) -> Option<Self> {
        direction
            .try_normalize()
            .map(|direction| Self { origin, direction })
    }

    /// Build the mirror reflection of `incoming` about `normal` at `point`.
    ///
    /// The new origin is pushed off the surface by `bias` along the normal so
    /// the reflected ray does not immediately re-hit the surface it left.
    pub fn reflected(incoming: Vec3, point: Vec3, normal: Vec3, bias: f32) -> Self {
        Self::new(point + normal * bias, reflect(incoming, normal))
    }

    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Unit-length direction.
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Reflect `v` about the unit normal `n`: `v - 2(v·n)n`.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}
