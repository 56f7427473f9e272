//! An RGB image produced by the renderers

use crate::color::Rgb;
use anyhow::{ensure, Context, Error};
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ColorType, ImageEncoder};
use ndarray::Array2;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// A 2D image of [`Rgb`] pixels, indexed `[[row, col]]` with row 0 at the top
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pixels: Array2<Rgb>,
}

impl Frame {
    /// A `width` by `height` image filled with `fill`
    pub fn new(width: usize, height: usize, fill: Rgb) -> Self {
        Self {
            pixels: Array2::from_elem((height, width), fill),
        }
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.pixels.ncols()
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.pixels.nrows()
    }

    /// The pixel at column `x`, row `y`
    pub fn get(&self, x: usize, y: usize) -> Option<Rgb> {
        self.pixels.get([y, x]).copied()
    }

    /// Set the pixel at column `x`, row `y`; out-of-bounds writes are ignored
    pub fn set(&mut self, x: usize, y: usize, color: Rgb) {
        if let Some(pixel) = self.pixels.get_mut([y, x]) {
            *pixel = color;
        }
    }

    /// Paint rows `y_start..y_end` of column `x`
    pub fn fill_column(&mut self, x: usize, y_start: usize, y_end: usize, color: Rgb) {
        for y in y_start..y_end.min(self.height()) {
            self.set(x, y, color);
        }
    }

    /// The underlying pixels
    pub fn pixels(&self) -> &Array2<Rgb> {
        &self.pixels
    }

    /// The underlying pixels, mutably
    pub fn pixels_mut(&mut self) -> &mut Array2<Rgb> {
        &mut self.pixels
    }

    /// Tightly packed row-major RGB8 bytes
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| p.to_bytes()).collect()
    }

    /// Encode the frame as an RGB8 PNG at `path`
    pub fn write_png(&self, path: &Path) -> Result<(), Error> {
        ensure!(
            self.width() > 0 && self.height() > 0,
            "Cannot write an empty {}x{} frame",
            self.width(),
            self.height()
        );
        let width = u32::try_from(self.width()).context("Frame is too wide for a PNG")?;
        let height = u32::try_from(self.height()).context("Frame is too tall for a PNG")?;

        let file = File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        let encoder = PngEncoder::new_with_quality(
            BufWriter::new(file),
            CompressionType::Fast,
            FilterType::NoFilter,
        );
        encoder
            .write_image(&self.to_rgb8(), width, height, ColorType::Rgb8)
            .with_context(|| format!("Failed to encode {}", path.display()))?;
        Ok(())
    }
}
