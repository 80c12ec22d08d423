//! Terminal canvas: each cell is a 2x4 grid of braille dots.

use super::{raster, Canvas};
use crate::colors::Rgb;
use crate::error::Result;
use crate::terminal::Terminal;
use crate::tree::geometry::Point;
use crossterm::queue;
use crossterm::style::{Print, ResetColor, SetForegroundColor};
use std::io::{self, Write};

/// Bit for the dot at (column, row) inside a cell
const DOT_BITS: [[u8; 4]; 2] = [[0x01, 0x02, 0x04, 0x40], [0x08, 0x10, 0x20, 0x80]];

pub struct BrailleCanvas {
    cols: u16,
    rows: u16,
    cells: Vec<u8>,
    colors: Vec<Option<Rgb>>,
}

impl BrailleCanvas {
    pub fn new(cols: u16, rows: u16) -> Self {
        let n = cols as usize * rows as usize;
        Self {
            cols,
            rows,
            cells: vec![0; n],
            colors: vec![None; n],
        }
    }

    fn set_dot(&mut self, x: u32, y: u32, color: Rgb) {
        let (cx, cy) = (x / 2, y / 4);
        if cx >= u32::from(self.cols) || cy >= u32::from(self.rows) {
            return;
        }
        let idx = cy as usize * self.cols as usize + cx as usize;
        self.cells[idx] |= DOT_BITS[(x % 2) as usize][(y % 4) as usize];
        self.colors[idx] = Some(color);
    }

    /// Glyph and color of a cell, `None` when no dot is set
    pub fn cell(&self, col: u16, row: u16) -> Option<(char, Rgb)> {
        let idx = row as usize * self.cols as usize + col as usize;
        let bits = *self.cells.get(idx)?;
        if bits == 0 {
            return None;
        }
        let ch = char::from_u32(0x2800 + u32::from(bits)).unwrap_or(' ');
        Some((ch, self.colors[idx]?))
    }

    /// Copy the painted cells into the terminal back buffer
    pub fn blit(&self, term: &mut Terminal) {
        for row in 0..self.rows {
            for col in 0..self.cols {
                if let Some((ch, color)) = self.cell(col, row) {
                    term.set(i32::from(col), i32::from(row), ch, Some(color.to_terminal()), false);
                }
            }
        }
    }

    /// Plain stream output with truecolor escapes, one line per row
    pub fn write_ansi(&self, out: &mut impl Write) -> io::Result<()> {
        for row in 0..self.rows {
            let mut line = String::new();
            for col in 0..self.cols {
                match self.cell(col, row) {
                    Some((ch, color)) => {
                        queue!(out, Print(&line), SetForegroundColor(color.to_terminal()), Print(ch), ResetColor)?;
                        line.clear();
                    }
                    None => line.push(' '),
                }
            }
            queue!(out, Print(line.trim_end()), Print('\n'))?;
        }
        out.flush()
    }
}

impl Canvas for BrailleCanvas {
    fn size(&self) -> (u32, u32) {
        (u32::from(self.cols) * 2, u32::from(self.rows) * 4)
    }

    /// Terminal background stays as the user has it; only the dots are wiped
    fn fill(&mut self, _color: Rgb) {
        self.cells.fill(0);
        self.colors.fill(None);
    }

    fn stroke(&mut self, from: Point, to: Point, width: f64, color: Rgb) {
        let size = self.size();
        let mut hits = Vec::new();
        raster::stroke(from, to, width, size, |x, y| hits.push((x, y)));
        for (x, y) in hits {
            self.set_dot(x, y, color);
        }
    }

    fn square(&mut self, center: Point, half_side: f64, color: Rgb) {
        let size = self.size();
        let mut hits = Vec::new();
        raster::square(center, half_side, size, |x, y| hits.push((x, y)));
        for (x, y) in hits {
            self.set_dot(x, y, color);
        }
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GREEN: Rgb = Rgb::new(0, 255, 0);

    #[test]
    fn dot_size_is_two_by_four_per_cell() {
        assert_eq!(BrailleCanvas::new(40, 10).size(), (80, 40));
    }

    #[test]
    fn single_dot_glyphs() {
        let mut canvas = BrailleCanvas::new(2, 1);
        canvas.set_dot(0, 0, GREEN);
        canvas.set_dot(3, 3, GREEN);
        assert_eq!(canvas.cell(0, 0), Some(('\u{2801}', GREEN)));
        assert_eq!(canvas.cell(1, 0), Some(('\u{2880}', GREEN)));
    }

    #[test]
    fn full_cell_from_square() {
        let mut canvas = BrailleCanvas::new(1, 1);
        canvas.square(Point::new(1.0, 2.0), 2.0, GREEN);
        assert_eq!(canvas.cell(0, 0), Some(('\u{28ff}', GREEN)));
        canvas.fill(Rgb::new(0, 0, 0));
        assert_eq!(canvas.cell(0, 0), None);
    }

    #[test]
    fn later_color_wins_in_cell() {
        let mut canvas = BrailleCanvas::new(1, 1);
        canvas.set_dot(0, 0, GREEN);
        canvas.set_dot(1, 1, Rgb::new(1, 1, 1));
        assert_eq!(canvas.cell(0, 0).map(|c| c.1), Some(Rgb::new(1, 1, 1)));
    }

    #[test]
    fn ansi_output_has_one_line_per_row() {
        let mut canvas = BrailleCanvas::new(3, 2);
        canvas.stroke(Point::new(0.5, 0.5), Point::new(5.5, 0.5), 1.0, GREEN);
        let mut out = Vec::new();
        canvas.write_ansi(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.contains('\u{2809}'));
        assert!(text.contains("\x1b[38;2;0;255;0m"));
    }
}
