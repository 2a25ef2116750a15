//! ECS components.

pub mod physics;

pub use physics::*;
