//! Sub-stepping collision resolver for a single active entity.
//!
//! Each frame the active entity's motion is split into sub-steps. For every
//! sub-step the largest advance with no solid contact is found by bisection,
//! contacts at that advance correct the entity's velocity, and moving
//! surfaces push it. Afterwards, a push that nearly opposes a blocked
//! direction marks the entity as crushed.

use crate::ecs::components::physics::RigidEntity;
use crate::error::{CollisionError, Result};
use crate::geometry::{push_unique, Polygon, Vector2, VectorExt};

use super::contact::Contact;
use super::narrowphase::{contact_points, representative};

/// Bisection stops once the candidate advance is at or below this (time units).
pub const SUBSTEP_FLOOR: f64 = 0.05;
/// A push direction and a blocked direction with a dot product below this
/// are considered opposed.
pub const CRUSH_DOT: f64 = -0.95;

/// Outcome of one solver invocation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolverResult {
    /// Unique surface normals the entity was blocked by.
    pub blocked_directions: Vec<Vector2>,
    /// Unique unit directions the entity was pushed in by moving surfaces.
    pub push_directions: Vec<Vector2>,
    pub crushed: bool,
}

/// What a debug-draw polygon represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebugLayer {
    /// Active entity outline at a candidate advance.
    Candidate,
    /// Obstacle outline at an advance that produced a contact.
    Obstacle,
}

/// Optional visualisation hook. Every method defaults to a no-op.
pub trait DebugDraw {
    fn polygon(&mut self, _polygon: &Polygon, _layer: DebugLayer) {}
    fn contact(&mut self, _contact: &Contact) {}
}

/// Resolve `active_id` against `obstacles` and write back its position and
/// velocity.
///
/// `obstacles` may include the active entity itself; it is skipped.
pub fn solve(
    world: &mut hecs::World,
    active_id: hecs::Entity,
    obstacles: &[hecs::Entity],
    solid_mask: u32,
    frame_step: f64,
    debug: Option<&mut dyn DebugDraw>,
) -> Result<SolverResult> {
    let mut active = (*world.get::<&RigidEntity>(active_id)?).clone();

    let result = resolve(
        world,
        &mut active,
        Some(active_id),
        obstacles,
        solid_mask,
        frame_step,
        debug,
    )?;

    let mut stored = world.get::<&mut RigidEntity>(active_id)?;
    stored.position = active.position;
    stored.velocity = active.velocity;
    Ok(result)
}

/// Resolve a detached `active` entity against obstacles stored in `world`.
///
/// Only `active.position` and `active.velocity` are modified.
pub fn resolve(
    world: &hecs::World,
    active: &mut RigidEntity,
    active_id: Option<hecs::Entity>,
    obstacles: &[hecs::Entity],
    solid_mask: u32,
    frame_step: f64,
    mut debug: Option<&mut dyn DebugDraw>,
) -> Result<SolverResult> {
    if solid_mask == 0 {
        return Err(CollisionError::EmptySolidMask);
    }
    if !frame_step.is_finite() || frame_step <= 0.0 {
        return Err(CollisionError::InvalidFrameStep(frame_step));
    }
    active.validate()?;

    // Obstacles are read-only for the whole frame; only solid ones that can
    // hit the active entity matter.
    let mut solids = Vec::with_capacity(obstacles.len());
    for &id in obstacles {
        if Some(id) == active_id {
            continue;
        }
        let other = world.get::<&RigidEntity>(id)?;
        other.validate()?;
        if active.can_be_hit_by(&other) && other.collision_group & solid_mask != 0 {
            solids.push((id, (*other).clone()));
        }
    }

    let mut blocked = Vec::new();
    let mut pushes = Vec::new();
    let mut step_total = 0.0;

    while step_total < frame_step {
        let mut remaining = frame_step - step_total;
        let mut contacts = Vec::new();

        while remaining > SUBSTEP_FLOOR {
            contacts = solid_contacts(
                world,
                active,
                &solids,
                step_total + remaining,
                debug.as_deref_mut(),
            )?;
            if contacts.is_empty() {
                break;
            }
            remaining *= 0.5;
            tracing::trace!(step_total, remaining, count = contacts.len(), "bisecting");
        }

        for contact in &contacts {
            if let Some(draw) = debug.as_deref_mut() {
                draw.contact(contact);
            }
            apply_contact(
                active,
                contact,
                step_total,
                frame_step,
                &mut blocked,
                &mut pushes,
            );
        }

        step_total += remaining;
    }

    let crushed = pushes
        .iter()
        .any(|push| blocked.iter().any(|b| push.dot(*b) < CRUSH_DOT));

    tracing::debug!(
        blocked = blocked.len(),
        pushes = pushes.len(),
        crushed,
        velocity = ?active.velocity,
        "collision solve finished"
    );
    if crushed {
        tracing::debug!(?active_id, "entity crushed between opposing surfaces");
    }

    Ok(SolverResult {
        blocked_directions: blocked,
        push_directions: pushes,
        crushed,
    })
}

/// Representative contact per solid obstacle at `time_fraction`.
fn solid_contacts(
    world: &hecs::World,
    active: &RigidEntity,
    solids: &[(hecs::Entity, RigidEntity)],
    time_fraction: f64,
    mut debug: Option<&mut (dyn DebugDraw + '_)>,
) -> Result<Vec<Contact>> {
    if let Some(draw) = debug.as_deref_mut() {
        draw.polygon(&active.world_polygon(time_fraction)?, DebugLayer::Candidate);
    }

    let mut contacts = Vec::new();
    for (id, other) in solids {
        let hits = contact_points(world, active, *id, other, time_fraction)?;
        if let Some(contact) = representative(&hits) {
            if let Some(draw) = debug.as_deref_mut() {
                draw.polygon(
                    &other.world_polygon_owned(time_fraction, *id)?,
                    DebugLayer::Obstacle,
                );
            }
            contacts.push(contact);
        }
    }
    Ok(contacts)
}

/// Velocity correction and push absorption for one contact.
fn apply_contact(
    active: &mut RigidEntity,
    contact: &Contact,
    step_total: f64,
    frame_step: f64,
    blocked: &mut Vec<Vector2>,
    pushes: &mut Vec<Vector2>,
) {
    push_unique(blocked, contact.normal);

    let closing_speed = active.velocity.dot(contact.normal);
    if closing_speed < 0.0 {
        // Already flush against the surface: stay put.
        let advance = if step_total < SUBSTEP_FLOOR {
            0.0
        } else {
            step_total
        };
        active.position += active.velocity * advance;
        active.velocity = (active.velocity - contact.normal * closing_speed) * (1.0 - advance);
    }

    // Cancel only the part of the push that agrees with the entity's heading.
    let mut push = contact.velocity;
    let heading = active.velocity.unit();
    let surface_heading = contact.velocity.unit();
    let shared = heading.dot(surface_heading);
    if shared > 0.0 {
        push -= surface_heading * shared;
    }

    if (active.position - contact.point).dot(push) > 0.0 {
        active.velocity += push * (frame_step - step_total);
        push_unique(pushes, push.unit());
    }

    tracing::trace!(
        point = ?contact.point,
        normal = ?contact.normal,
        closing_speed,
        ?push,
        "contact resolved"
    );
}
