//! Static vector export.

use super::Canvas;
use crate::colors::Rgb;
use crate::error::Result;
use crate::tree::geometry::Point;
use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

pub struct SvgCanvas {
    width: u32,
    height: u32,
    background: Option<Rgb>,
    body: String,
    output: Option<PathBuf>,
}

impl SvgCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            background: None,
            body: String::new(),
            output: None,
        }
    }

    /// Write the document to `path` when the surface is presented
    pub fn save_to(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }

    pub fn document(&self) -> String {
        let mut doc = String::with_capacity(self.body.len() + 256);
        let _ = writeln!(
            doc,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height,
        );
        if let Some(bg) = self.background {
            let _ = writeln!(doc, r#"<rect width="100%" height="100%" fill="{bg}"/>"#);
        }
        doc.push_str(&self.body);
        doc.push_str("</svg>\n");
        doc
    }
}

impl Canvas for SvgCanvas {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn fill(&mut self, color: Rgb) {
        self.background = Some(color);
        self.body.clear();
    }

    fn stroke(&mut self, from: Point, to: Point, width: f64, color: Rgb) {
        let _ = writeln!(
            self.body,
            r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{color}" stroke-width="{:.2}" stroke-linecap="round"/>"#,
            from.x, from.y, to.x, to.y, width,
        );
    }

    fn square(&mut self, center: Point, half_side: f64, color: Rgb) {
        let _ = writeln!(
            self.body,
            r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{color}"/>"#,
            center.x - half_side,
            center.y - half_side,
            half_side * 2.0,
            half_side * 2.0,
        );
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(path) = &self.output {
            fs::write(path, self.document())?;
            tracing::info!(path = %path.display(), bytes = self.body.len(), "wrote svg");
        }
        Ok(())
    }
}
