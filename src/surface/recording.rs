//! Test double that logs every command and tracks the turtle cursor.

use super::DrawingSurface;
use crate::colors::Rgb;
use crate::error::{Error, Result};
use crate::tree::geometry::{CursorState, Point};
use crate::tree::viewport::Transform;

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Background(Rgb),
    Clear,
    MoveTo(Point),
    Heading(f64),
    Color(Rgb),
    Width(f64),
    Forward(f64),
    Backward(f64),
    Stamp(Point, f64),
    Present,
}

pub struct RecordingSurface {
    pub commands: Vec<Command>,
    pub cursor: CursorState,
    pub transform: Option<Transform>,
    /// Every point a stroke passed through or a stamp covered, logical units
    pub touched: Vec<Point>,
    size: (u32, u32),
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            commands: Vec::new(),
            cursor: CursorState::ROOT,
            transform: None,
            touched: Vec::new(),
            size: (width, height),
        }
    }

    pub fn count(&self, pred: impl Fn(&Command) -> bool) -> usize {
        self.commands.iter().filter(|c| pred(c)).count()
    }

    fn stroke(&mut self, dist: f64) {
        let next = self.cursor.advanced(dist);
        self.touched.push(self.cursor.pos);
        self.touched.push(next.pos);
        self.cursor = next;
    }
}

impl DrawingSurface for RecordingSurface {
    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn ready(&self) -> Result<()> {
        if self.size.0 == 0 || self.size.1 == 0 {
            return Err(Error::SurfaceUnavailable("recording surface has no area".into()));
        }
        Ok(())
    }

    fn set_transform(&mut self, transform: Transform) {
        self.transform = Some(transform);
    }

    fn set_background(&mut self, color: Rgb) {
        self.commands.push(Command::Background(color));
    }

    fn clear(&mut self) {
        self.commands.push(Command::Clear);
        self.touched.clear();
    }

    fn move_to(&mut self, p: Point) {
        self.commands.push(Command::MoveTo(p));
        self.cursor.pos = p;
    }

    fn set_heading(&mut self, deg: f64) {
        self.commands.push(Command::Heading(deg));
        self.cursor.heading = deg;
    }

    fn pen_color(&mut self, color: Rgb) {
        self.commands.push(Command::Color(color));
    }

    fn pen_width(&mut self, width: f64) {
        self.commands.push(Command::Width(width));
    }

    fn forward(&mut self, dist: f64) {
        self.commands.push(Command::Forward(dist));
        self.stroke(dist);
    }

    fn backward(&mut self, dist: f64) {
        self.commands.push(Command::Backward(dist));
        self.stroke(-dist);
    }

    fn stamp_at(&mut self, p: Point, scale: f64) {
        self.commands.push(Command::Stamp(p, scale));
        let half = 10.0 * scale;
        self.touched.push(Point::new(p.x - half, p.y - half));
        self.touched.push(Point::new(p.x + half, p.y + half));
    }

    fn present(&mut self) -> Result<()> {
        self.commands.push(Command::Present);
        Ok(())
    }
}
