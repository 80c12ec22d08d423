//! RGBA raster canvas, saved as PNG on flush.

use super::{raster, Canvas};
use crate::colors::Rgb;
use crate::error::Result;
use crate::tree::geometry::Point;
use image::RgbaImage;
use std::path::PathBuf;

pub struct PixelCanvas {
    image: RgbaImage,
    output: Option<PathBuf>,
}

impl PixelCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
            output: None,
        }
    }

    /// Write the image to `path` when the surface is presented
    pub fn save_to(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }

    #[cfg(test)]
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }
}

impl Canvas for PixelCanvas {
    fn size(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    fn fill(&mut self, color: Rgb) {
        let px = color.to_rgba();
        for p in self.image.pixels_mut() {
            *p = px;
        }
    }

    fn stroke(&mut self, from: Point, to: Point, width: f64, color: Rgb) {
        let px = color.to_rgba();
        let image = &mut self.image;
        raster::stroke(from, to, width, image.dimensions(), |x, y| image.put_pixel(x, y, px));
    }

    fn square(&mut self, center: Point, half_side: f64, color: Rgb) {
        let px = color.to_rgba();
        let image = &mut self.image;
        raster::square(center, half_side, image.dimensions(), |x, y| image.put_pixel(x, y, px));
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(path) = &self.output {
            self.image.save_with_format(path, image::ImageFormat::Png)?;
            tracing::info!(path = %path.display(), "wrote png");
        }
        Ok(())
    }
}
