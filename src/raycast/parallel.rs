//! Every pixel computed on its own from a grid texture, fanned out with rayon
//!
//! Nothing here holds mutable state between pixels, so the work may be split across any number
//! of threads in any order. Run [`FrameRenderer::render`] inside [`rayon::ThreadPool::install`]
//! to choose which pool does the work.

use crate::camera::Camera;
use crate::color::{background_color, classification_color, shade_surface, Rgb};
use crate::frame::Frame;
use crate::grid::{Classification, GridTexture};
use crate::raycast::{
    column_u, correct_fisheye, project_height, ray_angle, row_v, Occluder, RayHit,
};
use crate::settings::RenderSettings;
use ndarray::Zip;
use rayon::prelude::*;

/// Renders whole frames one pixel at a time
#[derive(Clone, Debug, PartialEq)]
pub struct FrameRenderer {
    width: usize,
    height: usize,
    settings: RenderSettings,
}

impl FrameRenderer {
    /// Create a renderer for a `width` by `height` frame
    pub fn new(width: usize, height: usize, settings: RenderSettings) -> Self {
        Self {
            width,
            height,
            settings,
        }
    }

    /// Output width, in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Output height, in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// The settings used for marching and shading
    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Number of march steps needed to cover `max_depth`
    fn steps(&self) -> usize {
        (self.settings.max_depth / self.settings.step).ceil() as usize
    }

    /// March the ray at horizontal coordinate `u` through the texture.
    ///
    /// The loop runs a fixed number of iterations and derives each distance from the iteration
    /// index, so no value is carried from one step to the next.
    pub fn trace(&self, texture: &GridTexture, camera: &Camera, has_key: bool, u: f32) -> RayHit {
        let angle = ray_angle(camera, u, &self.settings);
        let (dx, dy) = (angle.cos(), angle.sin());
        let steps = self.steps();

        for i in 1..=steps {
            let distance = i as f32 * self.settings.step;
            let (x, y) = (
                camera.position.x + dx * distance,
                camera.position.y + dy * distance,
            );
            if let Some(classification) = texture.occluder_at(x, y, has_key) {
                return RayHit {
                    distance,
                    classification,
                };
            }
        }

        RayHit {
            distance: steps as f32 * self.settings.step,
            classification: Classification::Empty,
        }
    }

    /// The color of the pixel at normalized coordinates `(u, v)`, `v` increasing downwards
    pub fn shade_pixel(
        &self,
        texture: &GridTexture,
        camera: &Camera,
        has_key: bool,
        u: f32,
        v: f32,
    ) -> Rgb {
        let hit = self.trace(texture, camera, has_key, u);
        let Some(color) = classification_color(hit.classification, has_key) else {
            return background_color(v);
        };

        let angle = ray_angle(camera, u, &self.settings);
        let corrected = correct_fisheye(hit.distance, angle, camera.angle);
        let screen_height = self.height as f32;
        let band = project_height(corrected, screen_height, &self.settings) / screen_height;

        if (v - 0.5).abs() <= band / 2.0 {
            shade_surface(color, hit.distance, &self.settings)
        } else {
            background_color(v)
        }
    }

    /// Render a full frame, one ray per column as in [`column_u`] and rows sampled at pixel centers
    pub fn render(&self, texture: &GridTexture, camera: &Camera, has_key: bool) -> Frame {
        let mut frame = Frame::new(self.width, self.height, Rgb::default());
        let (width, height) = (self.width, self.height);

        Zip::indexed(frame.pixels_mut()).par_for_each(|(row, col), pixel| {
            *pixel = self.shade_pixel(
                texture,
                camera,
                has_key,
                column_u(col, width),
                row_v(row, height),
            );
        });

        frame
    }

    /// The hit for every column, left to right
    pub fn column_hits(&self, texture: &GridTexture, camera: &Camera, has_key: bool) -> Vec<RayHit> {
        (0..self.width)
            .into_par_iter()
            .map(|col| self.trace(texture, camera, has_key, column_u(col, self.width)))
            .collect()
    }
}
