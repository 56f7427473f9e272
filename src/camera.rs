//! The viewer's position and facing

use crate::grid::IntLocation;
use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

/// A snapshot of where the viewer stands and which way they face.
///
/// Positions are in grid cells and may be fractional. The angle is in radians, measured from the
/// +x axis towards +y, and is never normalized.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Position in grid cells
    pub position: Point2<f32>,
    /// Facing, in radians
    pub angle: f32,
}

impl Camera {
    /// Create a camera at `(x, y)` facing `angle`
    pub fn new(x: f32, y: f32, angle: f32) -> Self {
        Self {
            position: Point2::new(x, y),
            angle,
        }
    }

    /// Unit vector in the facing direction
    pub fn direction(&self) -> Vector2<f32> {
        Vector2::new(self.angle.cos(), self.angle.sin())
    }

    /// The grid cell the camera stands in
    pub fn cell(&self) -> IntLocation {
        IntLocation::containing(self.position.x, self.position.y)
    }
}
