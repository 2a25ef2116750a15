//! Rein 2D collision core
//!
//! Overlap and contact resolution for rotating polygonal entities that move
//! under a per-frame velocity.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! 1. **geometry** - Vectors, segments, polygons (intersection, side tests, normals)
//! 2. **ecs** - The `RigidEntity` component stored in a hecs world
//! 3. **physics** - Overlap query, sub-stepping solver, crush detection, host driver
//!
//! Nothing here renders or reads input; hosts pass entity state in and get
//! corrected state plus a [`SolverResult`] back.

pub mod ecs;
pub mod error;
pub mod geometry;
pub mod physics;

pub use error::{CollisionError, Result};

pub use geometry::{
    Aabb, Polygon, RayHit, Segment, SurfaceMaterials, SurfaceTag, Vector2, VectorExt,
};

pub use ecs::prelude::*;

pub use physics::contact::Contact;
pub use physics::solver::{solve, DebugDraw, DebugLayer, SolverResult};
pub use physics::{CollisionConfig, CollisionWorld};

// Re-export glam and hecs for convenience
pub use glam;
pub use hecs;
