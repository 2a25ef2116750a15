//! 2D vector helpers on top of `glam::DVec2`.

use glam::DVec2;

use crate::error::{CollisionError, Result};

/// All collision geometry is expressed in double precision.
pub type Vector2 = DVec2;

/// Build a vector, rejecting NaN and infinite components.
pub fn checked(x: f64, y: f64) -> Result<Vector2> {
    Vector2::new(x, y).ensure_finite("vector")
}

/// Operations the collision code needs beyond what glam provides.
pub trait VectorExt: Sized {
    /// Vector of length `radius` pointing at `angle` radians.
    fn from_polar(angle: f64, radius: f64) -> Self;

    /// Angle in `(-π, π]` measured from the +X axis.
    fn polar_angle(self) -> f64;

    /// Unit vector in the same direction. The zero vector stays zero.
    fn unit(self) -> Self;

    /// Copy rotated counter-clockwise (in y-up terms) by `angle` radians.
    fn rotated(self, angle: f64) -> Self;

    /// In-place variant of [`VectorExt::rotated`].
    fn rotate_by(&mut self, angle: f64);

    /// 2D cross product (z component of the 3D cross).
    fn cross(self, other: Self) -> f64;

    /// Fail with a descriptive error if any component is non-finite.
    fn ensure_finite(self, what: &'static str) -> Result<Self>;
}

impl VectorExt for Vector2 {
    #[inline]
    fn from_polar(angle: f64, radius: f64) -> Self {
        Vector2::new(angle.cos() * radius, angle.sin() * radius)
    }

    #[inline]
    fn polar_angle(self) -> f64 {
        self.y.atan2(self.x)
    }

    #[inline]
    fn unit(self) -> Self {
        self.normalize_or_zero()
    }

    #[inline]
    fn rotated(self, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Vector2::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    #[inline]
    fn rotate_by(&mut self, angle: f64) {
        *self = self.rotated(angle);
    }

    #[inline]
    fn cross(self, other: Self) -> f64 {
        self.perp_dot(other)
    }

    fn ensure_finite(self, what: &'static str) -> Result<Self> {
        if self.is_finite() {
            Ok(self)
        } else {
            Err(CollisionError::NonFinite {
                what,
                x: self.x,
                y: self.y,
            })
        }
    }
}

/// Append `v` unless an exactly equal vector is already present.
///
/// Equality is IEEE `==` on both components, never a tolerance: two
/// normals that differ in the last bit are kept as separate entries.
pub fn push_unique(set: &mut Vec<Vector2>, v: Vector2) {
    if !set.iter().any(|existing| *existing == v) {
        set.push(v);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_checked_rejects_nan() {
        assert!(checked(1.0, 2.0).is_ok());
        assert!(matches!(
            checked(f64::NAN, 0.0),
            Err(CollisionError::NonFinite { .. })
        ));
        assert!(checked(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_polar_round_trip() {
        for i in -7..=8 {
            let angle = i as f64 * PI / 8.0;
            if angle <= -PI {
                continue;
            }
            let v = Vector2::from_polar(angle, 3.5);
            assert!((v.polar_angle() - angle).abs() < EPS, "angle {angle}");
            assert!((v.length() - 3.5).abs() < EPS);
        }
    }

    #[test]
    fn test_unit_of_zero_is_zero() {
        assert_eq!(Vector2::ZERO.unit(), Vector2::ZERO);
        let u = Vector2::new(3.0, 4.0).unit();
        assert!((u - Vector2::new(0.6, 0.8)).length() < EPS);
    }

    #[test]
    fn test_rotation() {
        let v = Vector2::X.rotated(PI / 2.0);
        assert!((v - Vector2::Y).length() < EPS);

        let mut w = Vector2::new(1.0, 1.0);
        w.rotate_by(PI);
        assert!((w + Vector2::new(1.0, 1.0)).length() < EPS);
    }

    #[test]
    fn test_cross_sign() {
        assert_eq!(Vector2::X.cross(Vector2::Y), 1.0);
        assert_eq!(Vector2::Y.cross(Vector2::X), -1.0);
    }

    #[test]
    fn test_push_unique_is_exact() {
        let mut set = Vec::new();
        push_unique(&mut set, Vector2::new(0.0, -1.0));
        push_unique(&mut set, Vector2::new(0.0, -1.0));
        assert_eq!(set.len(), 1);

        // One ulp apart: kept as a distinct direction.
        let nudged = Vector2::new(0.0, f64::from_bits((-1.0f64).to_bits() + 1));
        push_unique(&mut set, nudged);
        assert_eq!(set.len(), 2);

        // Signed zeros compare equal.
        push_unique(&mut set, Vector2::new(-0.0, -1.0));
        assert_eq!(set.len(), 2);
    }
}
