//! Error type shared by the geometry and physics layers.

use thiserror::Error;

/// Precondition violations reported to the host.
///
/// Numerical edge cases (near-parallel segments, zero-length edges) are not
/// errors; they are absorbed by the documented epsilon thresholds.
#[derive(Debug, Error)]
pub enum CollisionError {
    #[error("{what} must be finite, got ({x}, {y})")]
    NonFinite { what: &'static str, x: f64, y: f64 },

    #[error("polygon needs at least 3 points, got {points}")]
    DegeneratePolygon { points: usize },

    #[error("entity size must be positive and finite, got {width} x {height}")]
    InvalidSize { width: f64, height: f64 },

    #[error("solid mask is empty; no obstacle could ever block")]
    EmptySolidMask,

    #[error("frame step must be positive and finite, got {0}")]
    InvalidFrameStep(f64),

    #[error(transparent)]
    Component(#[from] hecs::ComponentError),
}

pub type Result<T> = std::result::Result<T, CollisionError>;
