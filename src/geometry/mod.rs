//! 2D geometry primitives: vectors, segments, and polygons.
//!
//! The epsilon constants below are part of the collision contract; the
//! solver's convergence and tie-breaking depend on their exact values.

pub mod polygon;
pub mod segment;
pub mod vector;

use std::fmt;
use std::sync::Arc;

pub use polygon::{Aabb, Polygon, SurfaceMaterials};
pub use segment::{RayHit, Segment};
pub use vector::{checked, push_unique, Vector2, VectorExt};

/// Segments with `|dx|` below this are treated as vertical.
pub const VERTICAL_EPSILON: f64 = 0.01;
/// Points closer than this to a line are classified as on the line.
pub const SIDE_EPSILON: f64 = 0.01;
/// Slack applied to segment bounds checks.
pub const BOUNDS_FUDGE: f64 = 0.0001;

/// Whether `value` lies between `a` and `b` (in either order), with slack.
#[inline]
pub fn between(value: f64, a: f64, b: f64) -> bool {
    value >= a.min(b) - BOUNDS_FUDGE && value <= a.max(b) + BOUNDS_FUDGE
}

/// Surface material name attached to edges and polygons.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SurfaceTag(Arc<str>);

impl SurfaceTag {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SurfaceTag {
    fn from(name: &str) -> Self {
        Self(Arc::from(name))
    }
}

impl From<String> for SurfaceTag {
    fn from(name: String) -> Self {
        Self(Arc::from(name))
    }
}

impl fmt::Display for SurfaceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
