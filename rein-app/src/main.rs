use glam::DVec2;
use rein_collide::ecs::bridge::spawn_block;
use rein_collide::ecs::components::physics::collision_group::{PLAYER, WALL};
use rein_collide::ecs::components::physics::{RigidEntity, ShapeProvider};
use rein_collide::{CollisionConfig, CollisionWorld};

const GRAVITY: f64 = 0.25;
const MAX_FRAMES: usize = 240;

/// Player standing in a shaft while a press descends from above.
struct CrushScene {
    world: hecs::World,
    player: hecs::Entity,
    press: hecs::Entity,
}

impl CrushScene {
    fn new() -> anyhow::Result<Self> {
        let mut world = hecs::World::new();

        // Floor and shaft walls
        spawn_block(&mut world, DVec2::new(-60.0, 20.0), 120.0, 10.0, WALL)?;
        spawn_block(&mut world, DVec2::new(-60.0, -80.0), 10.0, 100.0, WALL)?;
        spawn_block(&mut world, DVec2::new(50.0, -80.0), 10.0, 100.0, WALL)?;

        let press = world.spawn((RigidEntity::new(DVec2::new(0.0, -60.0), 90.0, 10.0)
            .with_velocity(DVec2::new(0.0, 0.75))
            .with_group(WALL),));

        let player = world.spawn((RigidEntity::new(DVec2::new(0.0, 0.0), 8.0, 12.0)
            .with_shape(ShapeProvider::Oval { segments: 12 })
            .with_group(PLAYER),));

        Ok(Self {
            world,
            player,
            press,
        })
    }

    fn apply_gravity(&mut self) -> anyhow::Result<()> {
        let mut body = self.world.get::<&mut RigidEntity>(self.player)?;
        body.velocity.y += GRAVITY;
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let physics = CollisionWorld::new(CollisionConfig::default());
    let mut scene = CrushScene::new()?;

    for frame in 0..MAX_FRAMES {
        scene.apply_gravity()?;
        let results = physics.step(&mut scene.world, &[scene.player])?;

        let player = scene.world.get::<&RigidEntity>(scene.player)?;
        let press = scene.world.get::<&RigidEntity>(scene.press)?;
        for (_, result) in &results {
            log::info!(
                "frame {frame}: player y={:.3} press y={:.3} blocked={:?}",
                player.position.y,
                press.position.y,
                result.blocked_directions
            );
            if result.crushed {
                log::warn!("player crushed at frame {frame}");
                return Ok(());
            }
        }
    }

    log::info!("player survived {MAX_FRAMES} frames");
    Ok(())
}
