//! Logical grid structs and utilities.

use anyhow::{anyhow, Context, Error};
use ndarray::Array2;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};

pub mod standard_grids;

/// An integer location on the maze grid
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct IntLocation {
    /// Column - increases to the right
    pub x: i32,
    /// Row - increases downwards
    pub y: i32,
}

impl IntLocation {
    /// Create a new IntLocation
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The cell containing the given continuous point
    pub fn containing(x: f32, y: f32) -> Self {
        Self::new(x.floor() as i32, y.floor() as i32)
    }
}

/// Enum for [`Grid`] cell values.
///
/// The discriminants are the values stored in grid textures, so they must never change.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Hash,
    Eq,
    PartialEq,
    IntoPrimitive,
    TryFromPrimitive,
    Serialize,
    Deserialize,
)]
#[repr(u8)]
pub enum Classification {
    /// Passable floor
    #[default]
    Empty = 0,
    /// Always blocks movement and rays
    Wall = 1,
    /// Blocks unless the key is held
    Door = 2,
    /// Passable; picking it up unlocks doors
    Key = 3,
    /// Passable; reaching it wins
    Exit = 4,
}

impl Classification {
    /// Whether a cell of this classification stops movement and rays.
    ///
    /// ```
    /// use maze_raycaster::grid::Classification;
    ///
    /// assert!(Classification::Wall.blocks(true));
    /// assert!(Classification::Door.blocks(false));
    /// assert!(!Classification::Door.blocks(true));
    /// assert!(!Classification::Key.blocks(false));
    /// ```
    pub fn blocks(self, has_key: bool) -> bool {
        match self {
            Classification::Wall => true,
            Classification::Door => !has_key,
            Classification::Empty | Classification::Key | Classification::Exit => false,
        }
    }

    /// The classification as it is stored in a sampled texture
    pub fn as_sample(self) -> f32 {
        u8::from(self) as f32
    }

    /// Recover a classification from a texture sample.
    ///
    /// Samples are rounded to the nearest value; anything outside `0..=4` is treated as a wall.
    pub fn from_sample(sample: f32) -> Self {
        if !(-0.5..4.5).contains(&sample) {
            return Classification::Wall;
        }
        Classification::try_from(sample.round() as u8).unwrap_or(Classification::Wall)
    }
}

/// A 2D grid of [`Classification`]s.
///
/// The grid is indexed by `[row][col]`, with `row = y` and `col = x`. Its dimensions are fixed
/// when it is created. Every coordinate outside the grid reads as [`Classification::Wall`].
///
/// A grid serializes as its rows of raw cell values, and deserializing goes through the same
/// validation as [`Grid::try_from`].
///
/// # Examples
///
/// ```
/// use maze_raycaster::grid::{Classification, Grid};
///
/// let grid = Grid::try_from(vec![
///     vec![1u8, 1, 1],
///     vec![1, 0, 1],
///     vec![1, 1, 1],
/// ])
/// .unwrap();
///
/// assert_eq!(grid.classify(1, 1), Classification::Empty);
/// assert_eq!(grid.classify(-4, 1), Classification::Wall);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<u8>>", into = "Vec<Vec<u8>>")]
pub struct Grid {
    cells: Array2<Classification>,
}

/// Validates a [`Grid`] built from external data.
///
/// A valid grid must satisfy the following conditions:
/// - It has at least one row and one column.
/// - If it contains a door, it also contains a key.
fn validate_grid(cells: &Array2<Classification>) -> Result<(), Error> {
    if cells.nrows() == 0 {
        return Err(anyhow!("Grid has no rows"));
    }
    if cells.ncols() == 0 {
        return Err(anyhow!("Grid has no columns"));
    }

    let has = |c: Classification| cells.iter().any(|&cell| cell == c);
    if has(Classification::Door) && !has(Classification::Key) {
        return Err(Error::msg("Grid has a door but no key"));
    }

    Ok(())
}

impl TryFrom<Vec<Vec<u8>>> for Grid {
    type Error = Error;

    fn try_from(rows: Vec<Vec<u8>>) -> Result<Self, Self::Error> {
        let height = rows.len();
        let width = rows.first().map(Vec::len).unwrap_or(0);

        let mut cells = Array2::default((height, width));
        for (y, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(anyhow!(
                    "Row {} has {} cells, expected {}",
                    y,
                    row.len(),
                    width
                ));
            }
            for (x, &value) in row.iter().enumerate() {
                cells[[y, x]] = Classification::try_from(value)
                    .with_context(|| format!("Invalid cell value at ({}, {})", x, y))?;
            }
        }

        validate_grid(&cells)?;
        Ok(Self { cells })
    }
}

impl From<Grid> for Vec<Vec<u8>> {
    fn from(grid: Grid) -> Self {
        grid.cells
            .rows()
            .into_iter()
            .map(|row| row.iter().map(|&cell| u8::from(cell)).collect())
            .collect()
    }
}

impl<const W: usize, const H: usize> From<&[[Classification; W]; H]> for Grid {
    fn from(rows: &[[Classification; W]; H]) -> Self {
        Self {
            cells: Array2::from_shape_fn((H, W), |(y, x)| rows[y][x]),
        }
    }
}

impl Grid {
    /// Number of columns
    pub fn width(&self) -> usize {
        self.cells.ncols()
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.cells.nrows()
    }

    /// The underlying cells, indexed `[[row, col]]`
    pub fn cells(&self) -> &Array2<Classification> {
        &self.cells
    }

    /// Returns the classification at the given cell, or [`Classification::Wall`] if the cell is
    /// out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use maze_raycaster::grid::Classification;
    /// use maze_raycaster::grid::standard_grids::StandardGrid;
    ///
    /// let grid = StandardGrid::Vault.get_grid();
    /// assert_eq!(grid.classify(8, 6), Classification::Door);
    /// assert_eq!(grid.classify(7, 4), Classification::Key);
    /// assert_eq!(grid.classify(16, 0), Classification::Wall);
    /// ```
    pub fn classify(&self, x: i32, y: i32) -> Classification {
        if x < 0 || y < 0 {
            return Classification::Wall;
        }
        self.cells
            .get([y as usize, x as usize])
            .copied()
            .unwrap_or(Classification::Wall)
    }

    /// Returns whether the given cell blocks movement and rays.
    ///
    /// # Examples
    ///
    /// ```
    /// use maze_raycaster::grid::standard_grids::StandardGrid;
    ///
    /// let grid = StandardGrid::Vault.get_grid();
    /// assert!(grid.is_blocking(8, 6, false));
    /// assert!(!grid.is_blocking(8, 6, true));
    /// assert!(grid.is_blocking(0, 0, true));
    /// ```
    pub fn is_blocking(&self, x: i32, y: i32, has_key: bool) -> bool {
        self.classify(x, y).blocks(has_key)
    }

    /// Returns the classification of the cell containing the given continuous point
    pub fn classify_point(&self, x: f32, y: f32) -> Classification {
        let cell = IntLocation::containing(x, y);
        self.classify(cell.x, cell.y)
    }

    /// Returns the first cell, scanning row by row, with the given classification
    pub fn find(&self, classification: Classification) -> Option<IntLocation> {
        self.cells
            .indexed_iter()
            .find(|(_, &cell)| cell == classification)
            .map(|((y, x), _)| IntLocation::new(x as i32, y as i32))
    }

    /// The grid as a row-major single-channel image, with classification values preserved exactly
    pub fn texture(&self) -> Array2<u8> {
        self.cells.mapv(u8::from)
    }
}

/// A [`Grid`] exposed as an image that is read through normalized coordinates.
///
/// Sampling uses nearest filtering and clamps to the edge, so a sample never falls outside the
/// image. Cell-coordinate lookups that fall outside the grid report a wall.
#[derive(Clone, Debug, PartialEq)]
pub struct GridTexture {
    texels: Array2<u8>,
}

impl From<&Grid> for GridTexture {
    fn from(grid: &Grid) -> Self {
        Self {
            texels: grid.texture(),
        }
    }
}

impl GridTexture {
    /// Number of texels per row
    pub fn width(&self) -> usize {
        self.texels.ncols()
    }

    /// Number of rows of texels
    pub fn height(&self) -> usize {
        self.texels.nrows()
    }

    /// Sample the texture at normalized coordinates, `u` across and `v` down, both in `[0, 1]`
    pub fn sample(&self, u: f32, v: f32) -> f32 {
        if self.texels.is_empty() {
            return Classification::Wall.as_sample();
        }
        let texel = |t: f32, size: usize| ((t * size as f32).floor().max(0.0) as usize).min(size - 1);
        let col = texel(u, self.width());
        let row = texel(v, self.height());
        self.texels[[row, col]] as f32
    }

    /// Sample the cell containing the continuous grid point `(x, y)`
    pub fn sample_cell(&self, x: f32, y: f32) -> f32 {
        let (cx, cy) = (x.floor(), y.floor());
        if cx < 0.0 || cy < 0.0 || cx >= self.width() as f32 || cy >= self.height() as f32 {
            return Classification::Wall.as_sample();
        }
        self.sample(
            (cx + 0.5) / self.width() as f32,
            (cy + 0.5) / self.height() as f32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::standard_grids::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn classification_values() {
        assert_eq!(u8::from(Classification::Empty), 0);
        assert_eq!(u8::from(Classification::Wall), 1);
        assert_eq!(u8::from(Classification::Door), 2);
        assert_eq!(u8::from(Classification::Key), 3);
        assert_eq!(u8::from(Classification::Exit), 4);
        assert!(Classification::try_from(5u8).is_err());
    }

    #[test]
    fn classification_from_sample() {
        for c in [
            Classification::Empty,
            Classification::Wall,
            Classification::Door,
            Classification::Key,
            Classification::Exit,
        ] {
            assert_eq!(Classification::from_sample(c.as_sample()), c);
        }
        assert_eq!(Classification::from_sample(1.9), Classification::Door);
        assert_eq!(Classification::from_sample(-3.0), Classification::Wall);
        assert_eq!(Classification::from_sample(255.0), Classification::Wall);
        assert_eq!(Classification::from_sample(f32::NAN), Classification::Wall);
    }

    #[test]
    fn grid_from_rows() {
        let grid = Grid::try_from(vec![vec![1u8, 1, 1, 1], vec![1, 3, 2, 4], vec![1, 1, 1, 1]])
            .unwrap();
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.classify(1, 1), Classification::Key);
        assert_eq!(grid.classify(2, 1), Classification::Door);
        assert_eq!(grid.classify(3, 1), Classification::Exit);
    }

    #[test]
    fn validation_require_rows() {
        let v = Grid::try_from(Vec::<Vec<u8>>::new());
        assert_eq!(format!("{}", v.unwrap_err()), "Grid has no rows");
    }

    #[test]
    fn validation_require_columns() {
        let v = Grid::try_from(vec![Vec::<u8>::new(), Vec::new()]);
        assert_eq!(format!("{}", v.unwrap_err()), "Grid has no columns");
    }

    #[test]
    fn validation_ragged_rows() {
        let v = Grid::try_from(vec![vec![1u8, 1, 1], vec![1, 0]]);
        assert_eq!(
            format!("{}", v.unwrap_err()),
            "Row 1 has 2 cells, expected 3"
        );
    }

    #[test]
    fn validation_invalid_value() {
        let v = Grid::try_from(vec![vec![1u8, 1, 1], vec![1, 7, 1]]);
        assert_eq!(
            format!("{}", v.unwrap_err()),
            "Invalid cell value at (1, 1)"
        );
    }

    #[test]
    fn validation_door_needs_key() {
        let v = Grid::try_from(vec![vec![1u8, 1, 1], vec![1, 2, 1]]);
        assert_eq!(format!("{}", v.unwrap_err()), "Grid has a door but no key");
    }

    #[test]
    fn serde_rows() {
        let grid = StandardGrid::Vault.get_grid();
        let json = serde_json::to_string(&grid).unwrap();
        assert!(json.starts_with("[[1,1,1,1"));
        assert_eq!(serde_json::from_str::<Grid>(&json).unwrap(), grid);
    }

    #[test]
    fn serde_validates() {
        let err = serde_json::from_str::<Grid>("[]").unwrap_err();
        assert!(format!("{}", err).contains("Grid has no rows"), "{err}");

        let err = serde_json::from_str::<Grid>("[[2]]").unwrap_err();
        assert!(
            format!("{}", err).contains("Grid has a door but no key"),
            "{err}"
        );

        let err = serde_json::from_str::<Grid>("[[1, 1], [1]]").unwrap_err();
        assert!(format!("{}", err).contains("Row 1 has 1 cells"), "{err}");
    }

    #[test]
    fn binary_grid_has_no_gated_cells() {
        let grid = StandardGrid::Labyrinth.get_grid();
        assert!(grid.find(Classification::Door).is_none());
        assert!(grid.find(Classification::Key).is_none());
        assert!(grid.find(Classification::Exit).is_none());
        assert!(grid
            .cells()
            .iter()
            .all(|&c| c == Classification::Empty || c == Classification::Wall));
    }

    #[test]
    fn classify_and_block_are_total() {
        let grid = StandardGrid::Vault.get_grid();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..2000 {
            let x = rng.gen_range(-100..100);
            let y = rng.gen_range(-100..100);
            let c = grid.classify(x, y);
            let in_bounds = (0..16).contains(&x) && (0..16).contains(&y);
            if !in_bounds {
                assert_eq!(c, Classification::Wall);
                assert!(grid.is_blocking(x, y, true));
            }
            assert_eq!(grid.is_blocking(x, y, false), c.blocks(false));
        }
        for (x, y) in [
            (i32::MIN, 0),
            (0, i32::MIN),
            (i32::MAX, i32::MAX),
            (i32::MIN, i32::MAX),
        ] {
            assert_eq!(grid.classify(x, y), Classification::Wall);
            assert!(grid.is_blocking(x, y, false));
        }
    }

    #[test]
    fn door_gating() {
        let grid = StandardGrid::Vault.get_grid();
        let door = grid.find(Classification::Door).unwrap();
        assert_eq!(door, IntLocation::new(8, 6));
        assert!(grid.is_blocking(door.x, door.y, false));
        assert!(!grid.is_blocking(door.x, door.y, true));

        let wall = IntLocation::new(0, 0);
        assert!(grid.is_blocking(wall.x, wall.y, false));
        assert!(grid.is_blocking(wall.x, wall.y, true));
    }

    #[test]
    fn classify_point_floors() {
        let grid = StandardGrid::Vault.get_grid();
        assert_eq!(grid.classify_point(8.99, 6.01), Classification::Door);
        assert_eq!(grid.classify_point(-0.01, 3.0), Classification::Wall);
    }

    #[test]
    fn texture_preserves_values() {
        let grid = StandardGrid::Vault.get_grid();
        let texture = grid.texture();
        assert_eq!(texture.dim(), (grid.height(), grid.width()));
        for ((y, x), &value) in texture.indexed_iter() {
            assert_eq!(value, u8::from(grid.classify(x as i32, y as i32)));
        }
    }

    #[test]
    fn texture_sampling_matches_grid() {
        let grid = StandardGrid::Vault.get_grid();
        let texture = GridTexture::from(&grid);
        for y in -2..18 {
            for x in -2..18 {
                let sampled = texture.sample_cell(x as f32 + 0.3, y as f32 + 0.7);
                assert_eq!(Classification::from_sample(sampled), grid.classify(x, y));
            }
        }
    }

    #[test]
    fn texture_sampling_clamps_to_edge() {
        let grid = StandardGrid::Vault.get_grid();
        let texture = GridTexture::from(&grid);
        assert_eq!(texture.sample(-1.0, -1.0), texture.sample(0.0, 0.0));
        assert_eq!(texture.sample(2.0, 2.0), texture.sample(0.999, 0.999));
        // door at column 8, row 6
        assert_eq!(
            texture.sample(8.5 / 16.0, 6.5 / 16.0),
            Classification::Door.as_sample()
        );
    }
}
