//! A set of pre-made mazes

use crate::camera::Camera;
use crate::grid::{Classification, Grid};
use serde::{Deserialize, Serialize};

/// The built-in mazes
#[derive(Copy, Clone, Debug, Default, PartialOrd, PartialEq, Ord, Eq, Serialize, Deserialize)]
pub enum StandardGrid {
    /// Open room with a locked vault holding the key, and an exit
    #[default]
    Vault,
    /// Corridors of walls and empty cells only
    Labyrinth,
    /// A walled border around an empty interior
    Open,
}

impl StandardGrid {
    /// Get a list of all available grids
    pub fn get_all() -> [Self; 3] {
        [Self::Vault, Self::Labyrinth, Self::Open]
    }

    /// Get the [`Grid`] associated with this enum
    pub fn get_grid(&self) -> Grid {
        match self {
            Self::Vault => Grid::from(&GRID_VAULT),
            Self::Labyrinth => Grid::from(&GRID_LABYRINTH),
            Self::Open => Grid::from(&GRID_OPEN),
        }
    }

    /// Get the [`Camera`] the player starts with
    pub fn spawn_camera(&self) -> Camera {
        match self {
            Self::Vault => Camera::new(1.5, 1.5, 0.0),
            Self::Labyrinth => Camera::new(1.5, 1.5, 0.0),
            Self::Open => Camera::new(1.5, 1.5, 0.0),
        }
    }
}

const W: Classification = Classification::Wall;
const O: Classification = Classification::Empty;
const D: Classification = Classification::Door;
const K: Classification = Classification::Key;
const X: Classification = Classification::Exit;

/// The key sits in a walled vault whose only opening is a door; the exit is in the open room
///
/// ```
/// use maze_raycaster::grid::standard_grids::StandardGrid;
/// use maze_raycaster::grid::{Classification, IntLocation};
///
/// let grid = StandardGrid::Vault.get_grid();
/// assert_eq!(grid.find(Classification::Key), Some(IntLocation::new(7, 4)));
/// assert_eq!(grid.find(Classification::Door), Some(IntLocation::new(8, 6)));
/// assert_eq!(grid.find(Classification::Exit), Some(IntLocation::new(7, 14)));
/// ```
#[rustfmt::skip]
pub const GRID_VAULT: [[Classification; 16]; 16] = [
    [W, W, W, W, W, W, W, W, W, W, W, W, W, W, W, W], // 0
    [W, O, O, O, O, O, O, O, O, O, O, O, O, O, O, W],
    [W, O, O, O, O, O, O, O, O, O, O, O, O, O, O, W],
    [W, O, O, O, O, O, W, W, W, W, O, O, O, O, O, W],
    [W, O, O, O, O, O, W, K, O, W, O, O, O, O, O, W],
    [W, O, O, O, O, O, W, O, O, W, O, O, O, O, O, W], // 5
    [W, O, O, O, O, O, W, W, D, W, O, O, O, O, O, W],
    [W, O, O, O, O, O, O, O, O, O, O, O, O, O, O, W],
    [W, O, O, O, O, O, O, O, O, O, O, O, O, O, O, W],
    [W, O, O, O, O, O, O, O, O, O, O, O, O, O, O, W],
    [W, O, O, O, O, O, O, O, O, O, O, O, O, O, O, W], // 10
    [W, O, O, O, O, O, O, O, O, O, O, O, O, O, O, W],
    [W, O, O, O, O, O, O, O, O, O, O, O, O, O, O, W],
    [W, O, O, O, O, O, O, O, O, O, O, O, O, O, O, W],
    [W, O, O, O, O, O, O, X, O, O, O, O, O, O, O, W],
    [W, W, W, W, W, W, W, W, W, W, W, W, W, W, W, W], // 15
//   |              |              |              |
//   0              5              10             15
];

/// Walls and empty cells only; no door, key, or exit
#[rustfmt::skip]
pub const GRID_LABYRINTH: [[Classification; 16]; 16] = [
    [W, W, W, W, W, W, W, W, W, W, W, W, W, W, W, W], // 0
    [W, O, O, O, O, O, O, O, O, O, O, O, O, O, O, W],
    [W, O, W, O, W, W, W, O, W, W, W, O, W, W, O, W],
    [W, O, W, O, O, O, O, O, O, O, O, O, O, W, O, W],
    [W, O, W, W, W, W, O, W, W, W, O, W, O, W, O, W],
    [W, O, O, O, O, O, O, O, O, O, O, W, O, O, O, W], // 5
    [W, W, W, W, W, W, W, W, W, W, O, W, W, W, O, W],
    [W, O, O, O, O, O, O, O, O, W, O, O, O, W, O, W],
    [W, O, W, W, W, W, W, W, O, W, W, W, O, W, O, W],
    [W, O, O, O, O, O, O, W, O, O, O, O, O, W, O, W],
    [W, W, W, W, W, W, O, W, W, W, W, W, O, W, O, W], // 10
    [W, O, O, O, O, O, O, O, O, O, O, W, O, O, O, W],
    [W, O, W, W, W, W, W, W, W, W, O, W, W, W, O, W],
    [W, O, O, O, O, O, O, O, O, W, O, O, O, W, O, W],
    [W, O, O, O, O, O, O, O, O, O, O, O, O, O, O, W],
    [W, W, W, W, W, W, W, W, W, W, W, W, W, W, W, W], // 15
//   |              |              |              |
//   0              5              10             15
];

/// A walled border around an empty interior
#[rustfmt::skip]
pub const GRID_OPEN: [[Classification; 16]; 16] = [
    [W, W, W, W, W, W, W, W, W, W, W, W, W, W, W, W], // 0
    [W, O, O, O, O, O, O, O, O, O, O, O, O, O, O, W],
    [W, O, O, O, O, O, O, O, O, O, O, O, O, O, O, W],
    [W, O, O, O, O, O, O, O, O, O, O, O, O, O, O, W],
    [W, O, O, O, O, O, O, O, O, O, O, O, O, O, O, W],
    [W, O, O, O, O, O, O, O, O, O, O, O, O, O, O, W], // 5
    [W, O, O, O, O, O, O, O, O, O, O, O, O, O, O, W],
    [W, O, O, O, O, O, O, O, O, O, O, O, O, O, O, W],
    [W, O, O, O, O, O, O, O, O, O, O, O, O, O, O, W],
    [W, O, O, O, O, O, O, O, O, O, O, O, O, O, O, W],
    [W, O, O, O, O, O, O, O, O, O, O, O, O, O, O, W], // 10
    [W, O, O, O, O, O, O, O, O, O, O, O, O, O, O, W],
    [W, O, O, O, O, O, O, O, O, O, O, O, O, O, O, W],
    [W, O, O, O, O, O, O, O, O, O, O, O, O, O, O, W],
    [W, O, O, O, O, O, O, O, O, O, O, O, O, O, O, W],
    [W, W, W, W, W, W, W, W, W, W, W, W, W, W, W, W], // 15
//   |              |              |              |
//   0              5              10             15
];
