//! Ray marching against the grid, and the projection math shared by both realizations.
//!
//! [`sequential::Raycaster`] marches one ray per screen column on the calling thread.
//! [`parallel::FrameRenderer`] computes every pixel independently from a sampled grid texture and
//! may spread the work across any number of threads.

use crate::camera::Camera;
use crate::grid::{Classification, Grid, GridTexture, IntLocation};
use crate::settings::RenderSettings;

pub mod parallel;
pub mod sequential;

/// Something rays can be marched through
pub trait Occluder {
    /// The classification of the cell containing `(x, y)` if that cell stops a ray, otherwise
    /// `None`
    fn occluder_at(&self, x: f32, y: f32, has_key: bool) -> Option<Classification>;
}

impl Occluder for Grid {
    fn occluder_at(&self, x: f32, y: f32, has_key: bool) -> Option<Classification> {
        let cell = IntLocation::containing(x, y);
        if self.is_blocking(cell.x, cell.y, has_key) {
            Some(self.classify(cell.x, cell.y))
        } else {
            None
        }
    }
}

impl Occluder for GridTexture {
    fn occluder_at(&self, x: f32, y: f32, has_key: bool) -> Option<Classification> {
        let classification = Classification::from_sample(self.sample_cell(x, y));
        classification.blocks(has_key).then_some(classification)
    }
}

/// Where a ray stopped
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// Marched distance along the ray, before fisheye correction
    pub distance: f32,
    /// What stopped the ray; [`Classification::Empty`] if the ray ran out of depth
    pub classification: Classification,
}

impl RayHit {
    /// Whether the ray ran out of depth without hitting anything
    pub fn is_background(&self) -> bool {
        self.classification == Classification::Empty
    }
}

/// The absolute angle of the ray at normalized horizontal position `u`, where `0` is the left edge
/// of the view and `1` the right edge
pub fn ray_angle(camera: &Camera, u: f32, settings: &RenderSettings) -> f32 {
    camera.angle - settings.fov / 2.0 + u * settings.fov
}

/// Normalized horizontal position of `column` out of `width`, `column / width`.
///
/// Column `width / 2` lies exactly on the camera axis for even widths. A single column is the
/// camera axis itself.
pub fn column_u(column: usize, width: usize) -> f32 {
    if width <= 1 {
        return 0.5;
    }
    column as f32 / width as f32
}

/// Normalized vertical position of the center of `row` out of `height`
pub fn row_v(row: usize, height: usize) -> f32 {
    (row as f32 + 0.5) / height as f32
}

/// Project a marched distance onto the view plane, removing the fisheye bulge
pub fn correct_fisheye(distance: f32, ray_angle: f32, camera_angle: f32) -> f32 {
    distance * (ray_angle - camera_angle).cos()
}

/// Screen-space height of a wall at the given corrected distance
pub fn project_height(corrected_distance: f32, screen_height: f32, settings: &RenderSettings) -> f32 {
    screen_height / (corrected_distance + settings.height_epsilon) * settings.projection_scale
}
