//! Bridge between world-space level geometry and ECS entities.

use crate::ecs::components::physics::{RigidEntity, ShapeProvider};
use crate::error::Result;
use crate::geometry::{Polygon, Vector2};

/// Spawn a resting obstacle whose outline is an existing world-space polygon.
///
/// The entity is positioned at the polygon's centroid and carries the
/// outline as a [`ShapeProvider::Custom`] shape, so it keeps the polygon's
/// materials and edge overrides.
pub fn spawn_polygon(
    world: &mut hecs::World,
    polygon: &Polygon,
    collision_group: u32,
) -> Result<hecs::Entity> {
    let centroid = polygon.centroid();
    let bounds = polygon.bounds();
    let size = bounds.max - bounds.min;
    let local: Vec<Vector2> = polygon.points().iter().map(|p| *p - centroid).collect();

    let mut entity = RigidEntity::new(centroid, size.x, size.y)
        .with_shape(ShapeProvider::Custom(local))
        .with_group(collision_group)
        .with_materials(polygon.materials.clone());
    entity.edge_materials = polygon.edges().iter().map(|e| e.surface.clone()).collect();
    entity.validate()?;

    Ok(world.spawn((entity,)))
}

/// Spawn an axis-aligned rectangular obstacle from its top-left corner.
pub fn spawn_block(
    world: &mut hecs::World,
    top_left: Vector2,
    width: f64,
    height: f64,
    collision_group: u32,
) -> Result<hecs::Entity> {
    let entity = RigidEntity::new(top_left + Vector2::new(width, height) * 0.5, width, height)
        .with_group(collision_group);
    entity.validate()?;
    Ok(world.spawn((entity,)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::physics::collision_group;
    use crate::geometry::SurfaceMaterials;

    #[test]
    fn test_spawn_polygon_round_trips_outline() {
        let mut world = hecs::World::new();
        let mut outline = Polygon::rectangle(Vector2::new(10.0, 20.0), 4.0, 2.0)
            .unwrap()
            .with_materials(SurfaceMaterials {
                default: Some("metal".into()),
                top: None,
            });
        outline.set_edge_surface(1, Some("rubber".into()));

        let id = spawn_polygon(&mut world, &outline, collision_group::WALL).unwrap();
        let entity = world.get::<&RigidEntity>(id).unwrap();
        assert_eq!(entity.position, Vector2::new(12.0, 21.0));
        assert_eq!(entity.collision_group, collision_group::WALL);

        let rebuilt = entity.world_polygon(0.0).unwrap();
        for (a, b) in rebuilt.points().iter().zip(outline.points()) {
            assert!((*a - *b).length() < 1e-9);
        }
        assert_eq!(rebuilt.edges()[1].surface.as_ref().unwrap().as_str(), "rubber");
        assert_eq!(rebuilt.materials.default.as_ref().unwrap().as_str(), "metal");
    }

    #[test]
    fn test_spawn_block_rejects_bad_size() {
        let mut world = hecs::World::new();
        assert!(spawn_block(&mut world, Vector2::ZERO, 0.0, 5.0, collision_group::WALL).is_err());
        let id = spawn_block(&mut world, Vector2::ZERO, 4.0, 6.0, collision_group::WALL).unwrap();
        let entity = world.get::<&RigidEntity>(id).unwrap();
        assert_eq!(entity.position, Vector2::new(2.0, 3.0));
    }
}
