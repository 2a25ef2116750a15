//! Kinematic overlap and contact resolution for 2D entities.
//!
//! # Architecture
//!
//! One frame of the host loop runs:
//!
//! 1. Resolve each active entity in turn against every other entity
//!    (sub-step bisection, velocity correction, push absorption)
//! 2. Integrate positions and angles of all entities
//!
//! Resolution order matters: an entity resolved later sees the corrected
//! velocities of entities resolved earlier.

pub mod contact;
pub mod narrowphase;
pub mod rigid_body;
pub mod solver;

use crate::ecs::components::physics::{collision_group, RigidEntity};
use crate::error::Result;

use self::solver::{DebugDraw, SolverResult};

/// Configuration for collision resolution.
#[derive(Debug, Clone)]
pub struct CollisionConfig {
    /// Obstacles whose group intersects this mask block motion. Default: `WALL`.
    pub solid_mask: u32,
    /// Time budget of one frame, in frames. Default: 1.0.
    pub frame_step: f64,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            solid_mask: collision_group::WALL,
            frame_step: 1.0,
        }
    }
}

/// Host-side driver that resolves entities stored in a `hecs::World`.
pub struct CollisionWorld {
    config: CollisionConfig,
}

impl CollisionWorld {
    pub fn new(config: CollisionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CollisionConfig {
        &self.config
    }

    /// Resolve `active` against every other entity in the world.
    pub fn resolve(
        &self,
        world: &mut hecs::World,
        active: hecs::Entity,
        debug: Option<&mut dyn DebugDraw>,
    ) -> Result<SolverResult> {
        let obstacles: Vec<hecs::Entity> = world
            .query::<&RigidEntity>()
            .iter()
            .map(|(entity, _)| entity)
            .filter(|entity| *entity != active)
            .collect();

        solver::solve(
            world,
            active,
            &obstacles,
            self.config.solid_mask,
            self.config.frame_step,
            debug,
        )
    }

    /// Resolve every entity in `actives`, in order, then integrate the world.
    ///
    /// Stops at the first precondition failure; entities already resolved
    /// keep their corrected state and nothing is integrated.
    pub fn step(
        &self,
        world: &mut hecs::World,
        actives: &[hecs::Entity],
    ) -> Result<Vec<(hecs::Entity, SolverResult)>> {
        let mut results = Vec::with_capacity(actives.len());
        for &active in actives {
            let result = self.resolve(world, active, None)?;
            results.push((active, result));
        }

        rigid_body::integrate_positions(world, self.config.frame_step);
        Ok(results)
    }
}
