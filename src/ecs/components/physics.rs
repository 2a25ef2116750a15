//! Physics components for ECS entities.

use crate::geometry::{SurfaceMaterials, SurfaceTag, Vector2};

/// Collision group bitmasks.
///
/// Group [`NONE`](collision_group::NONE) collides with every non-ghost
/// entity; two entities sharing any non-zero bit never collide.
pub mod collision_group {
    pub const NONE: u32 = 0;
    pub const PLAYER: u32 = 1 << 0;
    pub const ENEMY: u32 = 1 << 1;
    pub const WALL: u32 = 1 << 2;
    pub const PLATFORM: u32 = 1 << 3;
    pub const PROJECTILE: u32 = 1 << 4;
}

/// Local-space outline of an entity, scaled by its width and height.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ShapeProvider {
    #[default]
    Rectangle,
    /// Isosceles triangle, apex at the top (negative y).
    Triangle,
    /// Regular polygon stretched to the entity's size.
    Oval { segments: usize },
    /// Points relative to the entity's position; not scaled.
    Custom(Vec<Vector2>),
}

/// Kinematic rigid entity component.
///
/// `position` is both the shape centre and the rotation pivot. Velocities
/// are per frame; the solver rewrites `position` and `velocity` of the
/// active entity and only reads everything else.
#[derive(Debug, Clone)]
pub struct RigidEntity {
    pub position: Vector2,
    pub velocity: Vector2,
    /// Radians.
    pub angle: f64,
    /// Radians per frame.
    pub angular_velocity: f64,
    pub width: f64,
    pub height: f64,
    pub shape: ShapeProvider,
    pub collision_group: u32,
    /// Ghosts take part in no collision queries.
    pub is_ghost: bool,
    pub materials: SurfaceMaterials,
    /// Per-edge material overrides, by edge index.
    pub edge_materials: Vec<Option<SurfaceTag>>,
}

impl RigidEntity {
    /// Create a resting rectangle of the given size centred on `position`.
    pub fn new(position: Vector2, width: f64, height: f64) -> Self {
        Self {
            position,
            velocity: Vector2::ZERO,
            angle: 0.0,
            angular_velocity: 0.0,
            width,
            height,
            shape: ShapeProvider::Rectangle,
            collision_group: collision_group::NONE,
            is_ghost: false,
            materials: SurfaceMaterials::default(),
            edge_materials: Vec::new(),
        }
    }

    pub fn with_velocity(mut self, velocity: Vector2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }

    pub fn with_angular_velocity(mut self, angular_velocity: f64) -> Self {
        self.angular_velocity = angular_velocity;
        self
    }

    pub fn with_shape(mut self, shape: ShapeProvider) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_group(mut self, collision_group: u32) -> Self {
        self.collision_group = collision_group;
        self
    }

    pub fn ghost(mut self) -> Self {
        self.is_ghost = true;
        self
    }

    pub fn with_materials(mut self, materials: SurfaceMaterials) -> Self {
        self.materials = materials;
        self
    }
}
