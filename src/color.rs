//! Colors for cell classifications, with distance shading and fog

use crate::constants::MIN_SHADE;
use crate::grid::Classification;
use crate::settings::RenderSettings;
use serde::{Deserialize, Serialize};

/// A linear RGB color with channels in `[0, 1]`
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    /// Red
    pub r: f32,
    /// Green
    pub g: f32,
    /// Blue
    pub b: f32,
}

impl Rgb {
    /// Create a color from its channels
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Multiply every channel by `factor`
    pub fn scale(self, factor: f32) -> Self {
        Self::new(self.r * factor, self.g * factor, self.b * factor)
    }

    /// Linear interpolation from `self` (at `t = 0`) to `other` (at `t = 1`)
    pub fn mix(self, other: Rgb, t: f32) -> Self {
        let lerp = |a: f32, b: f32| a + (b - a) * t;
        Self::new(
            lerp(self.r, other.r),
            lerp(self.g, other.g),
            lerp(self.b, other.b),
        )
    }

    /// 8-bit channels, clamped
    pub fn to_bytes(self) -> [u8; 3] {
        let byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [byte(self.r), byte(self.g), byte(self.b)]
    }
}

/// Above the horizon
pub const CEILING_COLOR: Rgb = Rgb::new(0.274_509_8, 0.509_803_9, 0.705_882_4);
/// Below the horizon
pub const FLOOR_COLOR: Rgb = Rgb::new(0.196_078_4, 0.196_078_4, 0.196_078_4);
/// Distant surfaces blend towards this
pub const FOG_COLOR: Rgb = Rgb::new(0.35, 0.38, 0.4);

/// [`Classification::Wall`]
pub const WALL_COLOR: Rgb = Rgb::new(0.4, 0.35, 0.3);
/// [`Classification::Door`] while locked
pub const DOOR_COLOR: Rgb = Rgb::new(0.35, 0.25, 0.15);
/// [`Classification::Door`] once the key is held
pub const UNLOCKED_DOOR_COLOR: Rgb = Rgb::new(0.25, 0.2, 0.15);
/// [`Classification::Key`]
pub const KEY_COLOR: Rgb = Rgb::new(0.85, 0.7, 0.2);
/// [`Classification::Exit`]
pub const EXIT_COLOR: Rgb = Rgb::new(0.2, 0.6, 0.25);

/// [`Classification::Empty`] on the minimap
pub const MINIMAP_EMPTY_COLOR: Rgb = Rgb::new(0.2, 0.2, 0.25);
/// The camera's cell on the minimap
pub const MINIMAP_CAMERA_COLOR: Rgb = Rgb::new(1.0, 1.0, 1.0);

/// The surface color of a classification, or `None` for [`Classification::Empty`], which shows
/// whatever lies behind it.
pub fn classification_color(classification: Classification, has_key: bool) -> Option<Rgb> {
    match classification {
        Classification::Empty => None,
        Classification::Wall => Some(WALL_COLOR),
        Classification::Door if has_key => Some(UNLOCKED_DOOR_COLOR),
        Classification::Door => Some(DOOR_COLOR),
        Classification::Key => Some(KEY_COLOR),
        Classification::Exit => Some(EXIT_COLOR),
    }
}

/// Floor below the horizon, ceiling above it; `v` increases downwards
pub fn background_color(v: f32) -> Rgb {
    if v > 0.5 {
        FLOOR_COLOR
    } else {
        CEILING_COLOR
    }
}

/// Brightness multiplier that falls linearly with distance
pub fn distance_shade(distance: f32, settings: &RenderSettings) -> f32 {
    (1.0 - (distance / settings.max_depth) * settings.shade_falloff).clamp(MIN_SHADE, 1.0)
}

/// How much of the fog color replaces a surface at `distance`
pub fn fog_factor(distance: f32, settings: &RenderSettings) -> f32 {
    1.0 - (-distance.max(0.0) / settings.fog_distance).exp()
}

/// Apply distance shading, then fog, to a surface color
pub fn shade_surface(color: Rgb, distance: f32, settings: &RenderSettings) -> Rgb {
    color
        .scale(distance_shade(distance, settings))
        .mix(FOG_COLOR, fog_factor(distance, settings))
}
