//! Rigid entity geometry, hit filtering, and integration.

use std::f64::consts::TAU;

use crate::ecs::components::physics::{RigidEntity, ShapeProvider};
use crate::error::{CollisionError, Result};
use crate::geometry::{Polygon, Vector2, VectorExt};

impl RigidEntity {
    /// Fail fast on state the solver cannot work with.
    pub fn validate(&self) -> Result<()> {
        self.position.ensure_finite("entity position")?;
        self.velocity.ensure_finite("entity velocity")?;
        Vector2::new(self.angle, self.angular_velocity).ensure_finite("entity angle")?;
        let size_ok = |v: f64| v.is_finite() && v > 0.0;
        if !size_ok(self.width) || !size_ok(self.height) {
            return Err(CollisionError::InvalidSize {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Outline relative to `position`, before rotation.
    pub fn local_points(&self) -> Vec<Vector2> {
        let hw = self.width * 0.5;
        let hh = self.height * 0.5;
        match &self.shape {
            ShapeProvider::Rectangle => vec![
                Vector2::new(-hw, -hh),
                Vector2::new(hw, -hh),
                Vector2::new(hw, hh),
                Vector2::new(-hw, hh),
            ],
            ShapeProvider::Triangle => vec![
                Vector2::new(0.0, -hh),
                Vector2::new(hw, hh),
                Vector2::new(-hw, hh),
            ],
            ShapeProvider::Oval { segments } => {
                let step = TAU / *segments as f64;
                (0..*segments)
                    .map(|i| {
                        let (sin, cos) = (i as f64 * step).sin_cos();
                        Vector2::new(cos * hw, sin * hh)
                    })
                    .collect()
            }
            ShapeProvider::Custom(points) => points.clone(),
        }
    }

    /// World-space outline after `time_fraction` frames of motion.
    ///
    /// Position and angle are advanced linearly by the current velocity and
    /// angular velocity. The returned polygon has no owner; see
    /// [`RigidEntity::world_polygon_owned`].
    pub fn world_polygon(&self, time_fraction: f64) -> Result<Polygon> {
        let position = self.position + self.velocity * time_fraction;
        let angle = self.angle + self.angular_velocity * time_fraction;

        let points = self
            .local_points()
            .into_iter()
            .map(|p| position + p.rotated(angle))
            .collect();

        let mut polygon = Polygon::from_points(points)?.with_materials(self.materials.clone());
        for (index, surface) in self.edge_materials.iter().enumerate() {
            if surface.is_some() {
                polygon.set_edge_surface(index, surface.clone());
            }
        }
        Ok(polygon)
    }

    /// [`RigidEntity::world_polygon`] with a weak back-reference to `owner`,
    /// so surface velocities can be queried.
    pub fn world_polygon_owned(&self, time_fraction: f64, owner: hecs::Entity) -> Result<Polygon> {
        Ok(self.world_polygon(time_fraction)?.with_owner(owner))
    }

    /// Whether `other` can produce contacts against this entity.
    ///
    /// Ghosts never collide. Entities sharing a non-zero group bit never
    /// collide with each other; group 0 collides with everything.
    pub fn can_be_hit_by(&self, other: &RigidEntity) -> bool {
        if self.is_ghost || other.is_ghost {
            return false;
        }
        self.collision_group & other.collision_group == 0
    }

    /// Velocity of a world point rigidly attached to this entity.
    ///
    /// The spin term is the displacement of the local-frame point over one
    /// frame of angular velocity, added without rotating it back to world
    /// space.
    pub fn velocity_at(&self, point: Vector2) -> Vector2 {
        let local = (point - self.position).rotated(-self.angle);
        let spun = local.rotated(self.angular_velocity);
        self.velocity + (spun - local)
    }
}

/// Advance every entity by its velocity and angular velocity: p += v * dt.
pub fn integrate_positions(world: &mut hecs::World, dt: f64) {
    for (_, entity) in world.query_mut::<&mut RigidEntity>() {
        entity.position += entity.velocity * dt;
        entity.angle += entity.angular_velocity * dt;
    }
}
