//! A top-down view of the maze

use crate::camera::Camera;
use crate::color::{classification_color, MINIMAP_CAMERA_COLOR, MINIMAP_EMPTY_COLOR};
use crate::frame::Frame;
use crate::grid::{Classification, Grid};

/// Draw every cell of `grid` as a `cell_size` pixel square, with the camera's cell highlighted.
///
/// ```
/// use maze_raycaster::camera::Camera;
/// use maze_raycaster::color::MINIMAP_CAMERA_COLOR;
/// use maze_raycaster::grid::standard_grids::StandardGrid;
/// use maze_raycaster::minimap::render_minimap;
///
/// let grid = StandardGrid::Open.get_grid();
/// let minimap = render_minimap(&grid, &Camera::new(2.5, 1.5, 0.0), false, 4);
///
/// assert_eq!(minimap.width(), 64);
/// assert_eq!(minimap.get(9, 5), Some(MINIMAP_CAMERA_COLOR));
/// ```
pub fn render_minimap(grid: &Grid, camera: &Camera, has_key: bool, cell_size: usize) -> Frame {
    let mut frame = Frame::new(
        grid.width() * cell_size,
        grid.height() * cell_size,
        MINIMAP_EMPTY_COLOR,
    );
    let camera_cell = camera.cell();

    for ((y, x), &cell) in grid.cells().indexed_iter() {
        let color = if (x as i32, y as i32) == (camera_cell.x, camera_cell.y) {
            MINIMAP_CAMERA_COLOR
        } else if cell == Classification::Empty {
            continue;
        } else {
            classification_color(cell, has_key).unwrap_or(MINIMAP_EMPTY_COLOR)
        };

        for px in x * cell_size..(x + 1) * cell_size {
            frame.fill_column(px, y * cell_size, (y + 1) * cell_size, color);
        }
    }

    frame
}
