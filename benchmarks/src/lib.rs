//! Shared setup helpers for rein-collide benchmarks.
//!
//! ## Running
//!
//!   cargo bench --manifest-path benchmarks/Cargo.toml --bench physics
//!
//! Filter by group:
//!   cargo bench --manifest-path benchmarks/Cargo.toml --bench physics -- solver

use glam::DVec2;
use rein_collide::ecs::bridge::spawn_block;
use rein_collide::ecs::components::physics::collision_group::{PLAYER, WALL};
use rein_collide::ecs::components::physics::RigidEntity;

/// A scene with one falling active body above a row of `n` blocks.
pub struct BenchScene {
    pub world: hecs::World,
    pub active: hecs::Entity,
    pub obstacles: Vec<hecs::Entity>,
}

/// Active body dropping onto a row of `n` 10x10 blocks laid edge to edge.
pub fn setup_floor_row(n: usize) -> anyhow::Result<BenchScene> {
    let mut world = hecs::World::new();
    let half = n as f64 * 5.0;

    let mut obstacles = Vec::with_capacity(n);
    for i in 0..n {
        let x = i as f64 * 10.0 - half;
        obstacles.push(spawn_block(&mut world, DVec2::new(x, 6.0), 10.0, 10.0, WALL)?);
    }

    let active = world.spawn((RigidEntity::new(DVec2::ZERO, 10.0, 10.0)
        .with_velocity(DVec2::new(0.5, 2.0))
        .with_group(PLAYER),));

    Ok(BenchScene {
        world,
        active,
        obstacles,
    })
}

/// Active body pinned between a floor and a descending, spinning press,
/// with `n` distant blocks as broad clutter.
pub fn setup_press(n: usize) -> anyhow::Result<BenchScene> {
    let mut world = hecs::World::new();
    let mut obstacles = Vec::with_capacity(n + 2);

    obstacles.push(spawn_block(&mut world, DVec2::new(-50.0, 6.0), 100.0, 10.0, WALL)?);
    obstacles.push(world.spawn((RigidEntity::new(DVec2::new(0.0, -8.0), 100.0, 4.0)
        .with_velocity(DVec2::new(0.0, 3.0))
        .with_angular_velocity(0.01)
        .with_group(WALL),)));

    for i in 0..n {
        let x = 200.0 + (i % 10) as f64 * 20.0;
        let y = (i / 10) as f64 * 20.0;
        obstacles.push(spawn_block(&mut world, DVec2::new(x, y), 10.0, 10.0, WALL)?);
    }

    let active = world.spawn((RigidEntity::new(DVec2::ZERO, 10.0, 10.0)
        .with_velocity(DVec2::new(0.0, 2.0))
        .with_group(PLAYER),));

    Ok(BenchScene {
        world,
        active,
        obstacles,
    })
}

/// Snapshot of the active entity, restored between iterations.
pub fn active_state(scene: &BenchScene) -> anyhow::Result<RigidEntity> {
    Ok((*scene.world.get::<&RigidEntity>(scene.active)?).clone())
}
