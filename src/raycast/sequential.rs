//! One ray per screen column, marched in order on the calling thread

use crate::camera::Camera;
use crate::color::{classification_color, shade_surface, CEILING_COLOR, FLOOR_COLOR};
use crate::frame::Frame;
use crate::grid::{Classification, Grid};
use crate::raycast::{column_u, correct_fisheye, project_height, ray_angle, Occluder, RayHit};
use crate::settings::RenderSettings;
use nalgebra::Vector2;

/// The visible surface in one screen column
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Column {
    /// Distance marched along the ray
    pub raw_distance: f32,
    /// `raw_distance` with the fisheye bulge removed
    pub distance: f32,
    /// Projected wall height, in pixels
    pub height: f32,
    /// What stopped the ray; [`Classification::Empty`] if nothing did
    pub classification: Classification,
}

impl Column {
    /// Whether the ray ran out of depth without hitting anything
    pub fn is_background(&self) -> bool {
        self.classification == Classification::Empty
    }

    /// The rows `y_start..y_end` covered by the wall, clamped to the screen, or `None` for a
    /// background column
    pub fn slice(&self, screen_height: usize) -> Option<(usize, usize)> {
        if self.is_background() {
            return None;
        }
        let screen_height_f = screen_height as f32;
        let clamp = |y: f32| (y.max(0.0) as usize).min(screen_height);
        let y_start = clamp((screen_height_f - self.height) / 2.0);
        let y_end = clamp((screen_height_f + self.height) / 2.0);
        Some((y_start, y_end))
    }
}

/// Casts rays for a fixed output resolution
#[derive(Clone, Debug, PartialEq)]
pub struct Raycaster {
    width: usize,
    height: usize,
    settings: RenderSettings,
}

impl Raycaster {
    /// Create a raycaster producing `width` columns for a screen `height` pixels tall
    pub fn new(width: usize, height: usize, settings: RenderSettings) -> Self {
        Self {
            width,
            height,
            settings,
        }
    }

    /// Number of columns produced per cast
    pub fn width(&self) -> usize {
        self.width
    }

    /// Screen height used for projection
    pub fn height(&self) -> usize {
        self.height
    }

    /// The settings used for marching and projection
    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// March a single ray from the camera at the absolute angle `angle`.
    ///
    /// The ray advances one step before each test, so the returned distance is never more than one
    /// step past `max_depth`.
    pub fn march<O: Occluder + ?Sized>(
        &self,
        occluder: &O,
        camera: &Camera,
        angle: f32,
        has_key: bool,
    ) -> RayHit {
        let direction = Vector2::new(angle.cos(), angle.sin());
        let mut distance = 0.0;

        while distance < self.settings.max_depth {
            distance += self.settings.step;
            let point = camera.position + direction * distance;
            if let Some(classification) = occluder.occluder_at(point.x, point.y, has_key) {
                return RayHit {
                    distance,
                    classification,
                };
            }
        }

        RayHit {
            distance,
            classification: Classification::Empty,
        }
    }

    /// Cast the ray for a single column
    pub fn cast_column(&self, grid: &Grid, camera: &Camera, has_key: bool, column: usize) -> Column {
        let angle = ray_angle(camera, column_u(column, self.width), &self.settings);
        let hit = self.march(grid, camera, angle, has_key);
        let distance = correct_fisheye(hit.distance, angle, camera.angle);

        Column {
            raw_distance: hit.distance,
            distance,
            height: project_height(distance, self.height as f32, &self.settings),
            classification: hit.classification,
        }
    }

    /// Cast one ray per column, returned in left-to-right order
    pub fn cast_rays(&self, grid: &Grid, camera: &Camera, has_key: bool) -> Vec<Column> {
        (0..self.width)
            .map(|column| self.cast_column(grid, camera, has_key, column))
            .collect()
    }

    /// Paint columns as flat ceiling and floor with a shaded vertical slice per wall
    pub fn render_columns(&self, columns: &[Column], has_key: bool) -> Frame {
        let mut frame = Frame::new(columns.len(), self.height, CEILING_COLOR);
        for x in 0..columns.len() {
            frame.fill_column(x, self.height / 2, self.height, FLOOR_COLOR);
        }

        for (x, column) in columns.iter().enumerate() {
            let (Some((y_start, y_end)), Some(color)) = (
                column.slice(self.height),
                classification_color(column.classification, has_key),
            ) else {
                continue;
            };
            let shaded = shade_surface(color, column.raw_distance, &self.settings);
            frame.fill_column(x, y_start, y_end, shaded);
        }

        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::standard_grids::StandardGrid;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

    fn raycaster(width: usize) -> Raycaster {
        Raycaster::new(width, 100, RenderSettings::default())
    }

    #[test]
    fn column_count() {
        let grid = StandardGrid::Vault.get_grid();
        let camera = StandardGrid::Vault.spawn_camera();
        for width in (1..=64).chain([640, 1280]) {
            assert_eq!(raycaster(width).cast_rays(&grid, &camera, false).len(), width);
        }
    }

    #[test]
    fn depth_is_bounded() {
        let settings = RenderSettings::default();
        for standard_grid in StandardGrid::get_all() {
            let grid = standard_grid.get_grid();
            for angle in [0.0, 0.7, 2.0, -1.3, 4.0] {
                let camera = Camera::new(1.5, 1.5, angle);
                for column in raycaster(97).cast_rays(&grid, &camera, false) {
                    assert!(column.raw_distance > 0.0);
                    assert!(column.raw_distance <= settings.max_depth + settings.step + 1e-3);
                    assert!(column.height.is_finite());
                }
            }
        }
    }

    #[test]
    fn wall_straight_ahead() {
        let grid = StandardGrid::Open.get_grid();
        let camera = Camera::new(1.5, 1.5, 0.0);
        let columns = raycaster(1).cast_rays(&grid, &camera, false);

        let column = columns[0];
        assert_eq!(column.classification, Classification::Wall);
        assert!((column.raw_distance - 13.5).abs() <= 0.06, "{column:?}");
        assert!((column.distance - column.raw_distance).abs() < 1e-4);
    }

    #[test]
    fn fisheye_correction_only_off_axis() {
        let grid = StandardGrid::Open.get_grid();
        let camera = Camera::new(8.0, 8.0, 0.0);
        for width in [2, 64, 100] {
            let columns = raycaster(width).cast_rays(&grid, &camera, false);

            let center = columns[width / 2];
            assert!((center.raw_distance - center.distance).abs() < 1e-4, "{center:?}");
            let edge = columns[0];
            assert!(edge.raw_distance - edge.distance > 0.5, "{edge:?}");

            // a flat wall stays flat once corrected
            for column in &columns {
                assert_eq!(column.classification, Classification::Wall);
                assert!((column.distance - 7.0).abs() <= 0.06, "{column:?}");
            }
        }
        let columns = raycaster(100).cast_rays(&grid, &camera, false);
        assert!(columns[99].raw_distance - columns[99].distance > 0.5);
    }

    #[test]
    fn columns_run_left_to_right() {
        // the north wall is close on the left of the view, the east wall far on the right
        let grid = StandardGrid::Open.get_grid();
        let camera = Camera::new(3.5, 1.5, 0.0);
        let r = raycaster(31);
        let columns = r.cast_rays(&grid, &camera, false);

        assert!(columns[0].raw_distance < 1.2);
        assert!(columns[30].raw_distance > 10.0);
        for (i, column) in columns.iter().enumerate() {
            assert_eq!(*column, r.cast_column(&grid, &camera, false, i));
        }
    }

    #[test]
    fn casting_is_deterministic() {
        let grid = StandardGrid::Labyrinth.get_grid();
        let camera = Camera::new(3.3, 5.7, 1.1);
        let r = raycaster(200);
        assert_eq!(
            r.cast_rays(&grid, &camera, false),
            r.cast_rays(&grid, &camera, false)
        );
    }

    #[test]
    fn locked_door_stops_ray() {
        let grid = StandardGrid::Vault.get_grid();
        let camera = Camera::new(8.5, 5.5, FRAC_PI_2);
        let column = raycaster(1).cast_rays(&grid, &camera, false)[0];

        assert_eq!(column.classification, Classification::Door);
        assert!(column.raw_distance >= 0.45 && column.raw_distance < 0.6, "{column:?}");
    }

    #[test]
    fn unlocked_door_lets_ray_through() {
        let grid = StandardGrid::Vault.get_grid();
        let camera = Camera::new(8.5, 5.5, FRAC_PI_2);
        let column = raycaster(1).cast_rays(&grid, &camera, true)[0];

        assert_eq!(grid.classify(8, 6), Classification::Door);
        assert!(!grid.is_blocking(8, 6, true));
        assert_eq!(column.classification, Classification::Wall);
        assert!((column.raw_distance - 9.5).abs() <= 0.06, "{column:?}");
    }

    #[test]
    fn far_wall_is_background() {
        let grid = StandardGrid::Open.get_grid();
        let camera = Camera::new(1.5, 1.5, FRAC_PI_4);
        let settings = RenderSettings::default();
        let column = raycaster(1).cast_rays(&grid, &camera, false)[0];

        assert!(column.is_background());
        assert!(column.raw_distance >= settings.max_depth);
        assert!(column.raw_distance <= settings.max_depth + settings.step + 1e-3);
        assert_eq!(column.slice(100), None);
    }

    #[test]
    fn open_field_is_background() {
        let grid = Grid::try_from(vec![vec![0u8; 40]; 40]).unwrap();
        let camera = Camera::new(1.5, 1.5, 0.0);
        let columns = raycaster(8).cast_rays(&grid, &camera, false);
        assert!(columns[4].is_background());

        // out of bounds reads as wall when it is within reach
        let camera = Camera::new(1.5, 1.5, std::f32::consts::PI);
        let columns = raycaster(8).cast_rays(&grid, &camera, false);
        assert_eq!(columns[4].classification, Classification::Wall);
        assert!(columns[4].raw_distance < 1.6);
    }

    #[test]
    fn slice_is_centered_and_clamped() {
        let column = Column {
            raw_distance: 2.0,
            distance: 2.0,
            height: 40.0,
            classification: Classification::Wall,
        };
        assert_eq!(column.slice(100), Some((30, 70)));

        let close = Column {
            height: 10_000.0,
            ..column
        };
        assert_eq!(close.slice(100), Some((0, 100)));
    }

    #[test]
    fn render_columns_paints_walls() {
        let grid = StandardGrid::Open.get_grid();
        let camera = Camera::new(8.0, 8.0, 0.0);
        let r = Raycaster::new(20, 60, RenderSettings::default());
        let columns = r.cast_rays(&grid, &camera, false);
        let frame = r.render_columns(&columns, false);

        assert_eq!(frame.width(), 20);
        assert_eq!(frame.height(), 60);
        assert_eq!(frame.get(10, 0), Some(CEILING_COLOR));
        assert_eq!(frame.get(10, 59), Some(FLOOR_COLOR));
        let wall = frame.get(10, 30).unwrap();
        assert_ne!(wall, CEILING_COLOR);
        assert_ne!(wall, FLOOR_COLOR);
    }
}
