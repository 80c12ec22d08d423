//! Drawing surfaces the renderer paints on.
//!
//! [`DrawingSurface`] is the turtle-style command sink the tree renderer
//! talks to. [`Plotter`] implements it over any device-level [`Canvas`]
//! (terminal braille, SVG, PNG), tracking the cursor in logical units and
//! mapping everything through the fitted [`Transform`].

pub mod braille;
pub mod pixels;
mod raster;
#[cfg(test)]
pub mod recording;
pub mod svg;

use crate::colors::Rgb;
use crate::error::{Error, Result};
use crate::tree::geometry::{BBox, CursorState, Point};
use crate::tree::viewport::{fit_viewport, Transform};

/// Command sink for the renderer. Positions, lengths and widths are logical.
pub trait DrawingSurface {
    /// Output size in device pixels
    fn size(&self) -> (u32, u32);

    /// Fails with `SurfaceUnavailable` when there is nothing to draw on
    fn ready(&self) -> Result<()>;

    fn set_transform(&mut self, transform: Transform);

    /// Set the background color and paint the surface with it
    fn set_background(&mut self, color: Rgb);

    /// Wipe everything drawn so far
    fn clear(&mut self);

    /// Pen-up move
    fn move_to(&mut self, p: Point);

    fn set_heading(&mut self, deg: f64);

    fn pen_color(&mut self, color: Rgb);

    fn pen_width(&mut self, width: f64);

    /// Stroke along the heading
    fn forward(&mut self, dist: f64);

    /// Stroke against the heading
    fn backward(&mut self, dist: f64);

    /// Square stamp centered on `p`; a scale-1 stamp is 20 units on a side
    fn stamp_at(&mut self, p: Point, scale: f64);

    fn present(&mut self) -> Result<()>;
}

/// Device-level primitives in pixel coordinates (y-down)
pub trait Canvas {
    fn size(&self) -> (u32, u32);

    fn fill(&mut self, color: Rgb);

    fn stroke(&mut self, from: Point, to: Point, width: f64, color: Rgb);

    fn square(&mut self, center: Point, half_side: f64, color: Rgb);

    fn flush(&mut self) -> Result<()>;
}

/// Turtle over a canvas
pub struct Plotter<C> {
    canvas: C,
    transform: Transform,
    cursor: CursorState,
    color: Rgb,
    width: f64,
    background: Rgb,
}

impl<C: Canvas> Plotter<C> {
    /// Starts with the logical origin centered at roughly one pixel per unit
    pub fn new(canvas: C) -> Self {
        let (w, h) = canvas.size();
        let margin = f64::from(w.min(h)) / 2.0;
        Self {
            transform: fit_viewport(&BBox::at(Point::ORIGIN), margin, w, h),
            canvas,
            cursor: CursorState::ROOT,
            color: Rgb::new(255, 255, 255),
            width: 1.0,
            background: Rgb::new(0, 0, 0),
        }
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    #[cfg(test)]
    pub fn cursor(&self) -> CursorState {
        self.cursor
    }

    fn stroke_to(&mut self, next: CursorState) {
        let from = self.transform.apply(self.cursor.pos);
        let to = self.transform.apply(next.pos);
        let width = self.transform.scale_length(self.width);
        self.canvas.stroke(from, to, width, self.color);
        self.cursor = next;
    }
}

impl<C: Canvas> DrawingSurface for Plotter<C> {
    fn size(&self) -> (u32, u32) {
        self.canvas.size()
    }

    fn ready(&self) -> Result<()> {
        match self.canvas.size() {
            (0, _) | (_, 0) => Err(Error::SurfaceUnavailable("canvas has no drawable area".into())),
            _ => Ok(()),
        }
    }

    fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }

    fn set_background(&mut self, color: Rgb) {
        self.background = color;
        self.canvas.fill(color);
    }

    fn clear(&mut self) {
        self.canvas.fill(self.background);
    }

    fn move_to(&mut self, p: Point) {
        self.cursor.pos = p;
    }

    fn set_heading(&mut self, deg: f64) {
        self.cursor.heading = deg;
    }

    fn pen_color(&mut self, color: Rgb) {
        self.color = color;
    }

    fn pen_width(&mut self, width: f64) {
        self.width = width;
    }

    fn forward(&mut self, dist: f64) {
        self.stroke_to(self.cursor.advanced(dist));
    }

    fn backward(&mut self, dist: f64) {
        self.stroke_to(self.cursor.advanced(-dist));
    }

    fn stamp_at(&mut self, p: Point, scale: f64) {
        let half = self.transform.scale_length(10.0 * scale);
        self.canvas.square(self.transform.apply(p), half, self.color);
    }

    fn present(&mut self) -> Result<()> {
        self.canvas.flush()
    }
}
