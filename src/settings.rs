//! Tunable options, loadable from a JSON file

use crate::constants::*;
use crate::grid::standard_grids::StandardGrid;
use anyhow::{ensure, Context, Error};
use log::info;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;
use std::fs;
use std::path::Path;

/// Options shared by both ray march realizations
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Total horizontal field of view, in radians
    pub fov: f32,
    /// Distance a ray advances between grid tests
    pub step: f32,
    /// Marched distance past which a ray has hit nothing
    pub max_depth: f32,
    /// Distance scale of the exponential fog
    pub fog_distance: f32,
    /// Multiplier applied to projected wall heights
    pub projection_scale: f32,
    /// Added to the projection denominator
    pub height_epsilon: f32,
    /// Fraction of brightness lost at `max_depth`
    pub shade_falloff: f32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            fov: FOV,
            step: MARCH_STEP,
            max_depth: MAX_DEPTH,
            fog_distance: FOG_DISTANCE,
            projection_scale: PROJECTION_SCALE,
            height_epsilon: HEIGHT_EPSILON,
            shade_falloff: SHADE_FALLOFF,
        }
    }
}

/// Options for player movement and the countdown
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Grid cells per second
    pub move_speed: f32,
    /// Radians per second
    pub rotation_speed: f32,
    /// Seconds until the session is lost
    pub time_limit: f32,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            move_speed: MOVE_SPEED,
            rotation_speed: ROTATION_SPEED,
            time_limit: TIME_LIMIT,
        }
    }
}

/// All options for the demo
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Which maze to load
    pub standard_grid: StandardGrid,
    /// Output width, in pixels
    pub width: usize,
    /// Output height, in pixels
    pub height: usize,
    /// Side length of one minimap cell, in pixels
    pub minimap_cell_size: usize,
    /// Ray marching and shading
    pub render: RenderSettings,
    /// Movement and timing
    pub session: SessionSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            standard_grid: Default::default(),
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            minimap_cell_size: MINIMAP_CELL_SIZE,
            render: Default::default(),
            session: Default::default(),
        }
    }
}

impl Settings {
    /// Read settings from a JSON file; missing fields take their default values
    pub fn load(path: &Path) -> Result<Self, Error> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;
        let settings: Settings = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse settings in {}", path.display()))?;
        settings.validate()?;
        info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Check that every option is usable
    pub fn validate(&self) -> Result<(), Error> {
        ensure!(self.width > 0 && self.height > 0, "Resolution must be non-zero");
        ensure!(self.minimap_cell_size > 0, "Minimap cell size must be non-zero");

        let render = &self.render;
        ensure!(
            render.fov > 0.0 && render.fov < PI,
            "Field of view must be between 0 and pi radians"
        );
        ensure!(render.step > 0.0, "March step must be positive");
        ensure!(
            render.max_depth > render.step,
            "Max depth must be larger than the march step"
        );
        ensure!(render.fog_distance > 0.0, "Fog distance must be positive");
        ensure!(
            render.height_epsilon > 0.0,
            "Height epsilon must be positive"
        );
        ensure!(
            (0.0..=1.0).contains(&render.shade_falloff),
            "Shade falloff must be between 0 and 1"
        );

        ensure!(
            self.session.time_limit > 0.0,
            "Time limit must be positive"
        );
        Ok(())
    }
}
