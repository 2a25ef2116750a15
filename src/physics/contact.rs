//! Contact data produced by the overlap query.

use crate::geometry::Vector2;

/// Tolerance on `|normal| - 1` before a contact normal is reported as suspect.
const UNIT_NORMAL_TOLERANCE: f64 = 1e-3;

/// A single point of contact against an obstacle surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Contact point in world space.
    pub point: Vector2,
    /// Outward unit normal of the struck surface.
    pub normal: Vector2,
    /// Velocity of the struck surface at `point`.
    pub velocity: Vector2,
}

impl Contact {
    /// Create a contact. A normal that is not (near-)unit is logged, not rejected.
    pub fn new(point: Vector2, normal: Vector2, velocity: Vector2) -> Self {
        let length = normal.length();
        if (length - 1.0).abs() > UNIT_NORMAL_TOLERANCE {
            tracing::warn!(?point, ?normal, length, "contact normal is not unit length");
        }
        Self {
            point,
            normal,
            velocity,
        }
    }

    /// Contact against a surface at rest.
    pub fn at_rest(point: Vector2, normal: Vector2) -> Self {
        Self::new(point, normal, Vector2::ZERO)
    }

    /// Squared speed of the struck surface; used to rank contacts.
    #[inline]
    pub fn speed_squared(&self) -> f64 {
        self.velocity.length_squared()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_at_rest() {
        let contact = Contact::at_rest(Vector2::new(1.0, 2.0), Vector2::new(0.0, -1.0));
        assert_eq!(contact.velocity, Vector2::ZERO);
        assert_eq!(contact.speed_squared(), 0.0);
    }

    #[test]
    fn test_non_unit_normal_is_kept() {
        // Logged as a warning, never rejected or renormalised.
        let contact = Contact::new(Vector2::ZERO, Vector2::new(0.0, -2.0), Vector2::new(3.0, 4.0));
        assert_eq!(contact.normal, Vector2::new(0.0, -2.0));
        assert_eq!(contact.speed_squared(), 25.0);
    }
}
