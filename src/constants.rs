//! Provides constants for the library.

use std::f32::consts::PI;

/// Total horizontal field of view, in radians (60 degrees)
pub const FOV: f32 = PI / 3.0;
/// Distance a ray advances between grid tests, in grid cells
pub const MARCH_STEP: f32 = 0.05;
/// Marched distance past which a ray is considered to have hit nothing
pub const MAX_DEPTH: f32 = 16.0;
/// Distance scale of the exponential fog
pub const FOG_DISTANCE: f32 = 12.0;
/// Multiplier applied to `screen_height / distance` when projecting wall heights
pub const PROJECTION_SCALE: f32 = 2.0;
/// Added to the projection denominator so a zero distance never divides by zero
pub const HEIGHT_EPSILON: f32 = 0.0001;
/// Fraction of brightness lost at [`MAX_DEPTH`]
pub const SHADE_FALLOFF: f32 = 0.5;
/// Lowest brightness multiplier distance shading may produce
pub const MIN_SHADE: f32 = 0.1;

/// Width of the default output image, in pixels
pub const SCREEN_WIDTH: usize = 320;
/// Height of the default output image, in pixels
pub const SCREEN_HEIGHT: usize = 180;
/// Side length of one minimap cell, in pixels
pub const MINIMAP_CELL_SIZE: usize = 8;

/// Player movement speed, in grid cells per second
pub const MOVE_SPEED: f32 = 3.0;
/// Player rotation speed, in radians per second
pub const ROTATION_SPEED: f32 = 2.0;
/// Seconds the player has to reach the exit
pub const TIME_LIMIT: f32 = 90.0;
