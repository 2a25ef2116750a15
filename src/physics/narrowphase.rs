//! Narrowphase: time-parameterized edge-crossing overlap test.

use crate::ecs::components::physics::RigidEntity;
use crate::error::Result;
use crate::geometry::BOUNDS_FUDGE;

use super::contact::Contact;

/// Every edge crossing between `active` and `other` at `time_fraction`.
///
/// Both outlines are advanced by their own velocities. Each crossing takes
/// the normal of the struck edge on `other` and the surface velocity of
/// `other` at the crossing point. Containment without crossing edges and
/// collinear touching produce no contacts.
pub fn contact_points(
    world: &hecs::World,
    active: &RigidEntity,
    other_id: hecs::Entity,
    other: &RigidEntity,
    time_fraction: f64,
) -> Result<Vec<Contact>> {
    let mine = active.world_polygon(time_fraction)?;
    let theirs = other.world_polygon_owned(time_fraction, other_id)?;

    if !mine.bounds().overlaps(&theirs.bounds(), BOUNDS_FUDGE) {
        return Ok(Vec::new());
    }

    let mut contacts = Vec::new();
    for edge in mine.edges() {
        for (their_edge, normal) in theirs.edges().iter().zip(theirs.normals()) {
            if let Some(point) = edge.intersects(their_edge, false) {
                let velocity = theirs.surface_velocity(point, world);
                contacts.push(Contact::new(point, *normal, velocity));
            }
        }
    }
    Ok(contacts)
}

/// Pick the contact whose surface moves fastest; the first one wins ties.
pub fn representative(contacts: &[Contact]) -> Option<Contact> {
    let mut best: Option<Contact> = None;
    for contact in contacts {
        match best {
            Some(current) if contact.speed_squared() <= current.speed_squared() => {}
            _ => best = Some(*contact),
        }
    }
    best
}

impl RigidEntity {
    /// Representative contact against the obstacle `other_id` at `time_fraction`.
    pub fn overlaps(
        &self,
        world: &hecs::World,
        other_id: hecs::Entity,
        time_fraction: f64,
    ) -> Result<Option<Contact>> {
        let other = world.get::<&RigidEntity>(other_id)?;
        let contacts = contact_points(world, self, other_id, &other, time_fraction)?;
        Ok(representative(&contacts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Vector2;

    fn square(x: f64, y: f64, size: f64) -> RigidEntity {
        RigidEntity::new(Vector2::new(x, y), size, size)
    }

    #[test]
    fn test_overlapping_squares() {
        let mut world = hecs::World::new();
        let active = square(0.0, 0.0, 10.0);
        let other = square(8.0, 3.0, 10.0);
        let other_id = world.spawn((other.clone(),));

        let contacts = contact_points(&world, &active, other_id, &other, 0.0).unwrap();
        assert_eq!(contacts.len(), 2);
        let normals = other.world_polygon(0.0).unwrap().normals().to_vec();
        for contact in &contacts {
            assert!(normals.contains(&contact.normal));
            assert_eq!(contact.velocity, Vector2::ZERO);
        }
    }

    #[test]
    fn test_separated_squares() {
        let mut world = hecs::World::new();
        let active = square(0.0, 0.0, 10.0);
        let other_id = world.spawn((square(30.0, 0.0, 10.0),));
        assert!(active.overlaps(&world, other_id, 0.0).unwrap().is_none());
    }

    #[test]
    fn test_containment_is_not_a_contact() {
        let mut world = hecs::World::new();
        let active = square(0.0, 0.0, 2.0);
        let other_id = world.spawn((square(0.0, 0.0, 10.0),));
        assert!(active.overlaps(&world, other_id, 0.0).unwrap().is_none());
    }

    #[test]
    fn test_overlap_at_time_fraction() {
        let mut world = hecs::World::new();
        let active = square(0.0, 0.0, 10.0).with_velocity(Vector2::new(0.0, 4.0));
        let floor_id = world.spawn((RigidEntity::new(Vector2::new(0.0, 12.0), 100.0, 10.0),));

        // Floor top at y=7, active bottom at y=5.
        assert!(active.overlaps(&world, floor_id, 0.25).unwrap().is_none());
        let contact = active.overlaps(&world, floor_id, 1.0).unwrap().unwrap();
        assert!((contact.normal - Vector2::new(0.0, -1.0)).length() < 1e-12);
        assert!((contact.point.y - 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_representative_is_fastest_surface() {
        let mut world = hecs::World::new();
        let active = square(0.0, 0.0, 10.0);
        let spinner = square(8.0, 1.0, 10.0)
            .with_velocity(Vector2::new(0.0, 0.5))
            .with_angular_velocity(0.2);
        let spinner_id = world.spawn((spinner.clone(),));

        let contacts = contact_points(&world, &active, spinner_id, &spinner, 0.0).unwrap();
        assert!(contacts.len() >= 2);
        let fastest = contacts
            .iter()
            .map(Contact::speed_squared)
            .fold(f64::MIN, f64::max);

        let chosen = active.overlaps(&world, spinner_id, 0.0).unwrap().unwrap();
        assert_eq!(chosen.speed_squared(), fastest);
    }

    #[test]
    fn test_representative_tie_keeps_first() {
        let a = Contact::new(Vector2::new(1.0, 0.0), Vector2::Y, Vector2::new(1.0, 0.0));
        let b = Contact::new(Vector2::new(2.0, 0.0), Vector2::Y, Vector2::new(0.0, 1.0));
        assert_eq!(representative(&[a, b]), Some(a));
        assert_eq!(representative(&[]), None);
    }

    #[test]
    fn test_missing_obstacle_is_an_error() {
        let mut world = hecs::World::new();
        let id = world.spawn((square(0.0, 0.0, 1.0),));
        world.despawn(id).unwrap();
        assert!(square(0.0, 0.0, 1.0).overlaps(&world, id, 0.0).is_err());
    }
}
