//! Drawing pass: turns traversal segments into surface commands.

use super::geometry::CursorState;
use super::traverse::{walk, Segment, TreeVisitor};
use crate::config::{DrawMode, TreeConfig};
use crate::error::Result;
use crate::palette::PaletteBook;
use crate::surface::DrawingSurface;

pub struct TreeRenderer<'a, S: ?Sized> {
    surface: &'a mut S,
    mode: DrawMode,
}

impl<'a, S: DrawingSurface + ?Sized> TreeRenderer<'a, S> {
    pub fn new(surface: &'a mut S, mode: DrawMode) -> Self {
        Self { surface, mode }
    }

    fn place(&mut self, at: CursorState) {
        self.surface.move_to(at.pos);
        self.surface.set_heading(at.heading);
    }

    fn stamp_along(&mut self, seg: &Segment) {
        let run = seg.stamps();
        for c in run.centers() {
            self.surface.stamp_at(c, run.scale);
        }
    }
}

impl<S: DrawingSurface + ?Sized> TreeVisitor for TreeRenderer<'_, S> {
    fn branch(&mut self, seg: &Segment) {
        self.surface.pen_color(seg.color);
        match self.mode {
            DrawMode::Line => {
                self.place(seg.start);
                self.surface.pen_width(seg.pen_width());
                self.surface.forward(seg.length);
            }
            DrawMode::Square => {
                self.stamp_along(seg);
                self.place(seg.end());
            }
        }
    }

    fn branch_done(&mut self, seg: &Segment) {
        // children may have left the cursor anywhere
        self.place(seg.start);
    }

    fn leaf(&mut self, seg: &Segment) {
        self.surface.pen_color(seg.color);
        match self.mode {
            DrawMode::Line => {
                self.place(seg.start);
                self.surface.pen_width(seg.pen_width());
                self.surface.forward(seg.length);
                self.surface.backward(seg.length);
            }
            DrawMode::Square => {
                self.stamp_along(seg);
                self.place(seg.start);
            }
        }
    }
}

/// Paint the tree for `cfg` in logical coordinates. The surface's transform
/// must already be set; the cursor ends where it started (origin, facing up).
pub fn render<S: DrawingSurface + ?Sized>(
    cfg: &TreeConfig,
    palettes: &PaletteBook,
    surface: &mut S,
) -> Result<()> {
    surface.ready()?;

    let palette = palettes.get(&cfg.palette_name);
    surface.set_background(palette.background);
    surface.move_to(CursorState::ROOT.pos);
    surface.set_heading(CursorState::ROOT.heading);

    let mut renderer = TreeRenderer::new(surface, cfg.draw_mode);
    walk(cfg, palette, &mut renderer);

    tracing::debug!(depth = cfg.depth, mode = ?cfg.draw_mode, palette = %palette.name, "rendered tree");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::surface::recording::{Command, RecordingSurface};
    use crate::tree::bounds::estimate_bounds;
    use crate::tree::geometry::Point;

    fn draw(cfg: &TreeConfig) -> RecordingSurface {
        let mut surface = RecordingSurface::new(320, 200);
        render(cfg, &PaletteBook::default(), &mut surface).unwrap();
        surface
    }

    fn golden(mode: DrawMode) -> TreeConfig {
        TreeConfig {
            depth: 3,
            angle_deg: 25.0,
            trunk_length: 100.0,
            shrink: 0.72,
            randomness: 0.0,
            seed: 0,
            draw_mode: mode,
            ..Default::default()
        }
    }

    #[test]
    fn golden_scenario_draw_counts() {
        let s = draw(&golden(DrawMode::Line));
        assert_eq!(s.count(|c| matches!(c, Command::Forward(_))), 15);
        assert_eq!(s.count(|c| matches!(c, Command::Backward(_))), 8);

        let book = PaletteBook::default();
        let classic = book.get("Classic");
        let trunk = s.count(|c| *c == Command::Color(classic.trunk_color));
        let leaves = s.count(|c| matches!(c, Command::Color(col) if classic.leaf_colors.contains(col)));
        assert_eq!((trunk, leaves), (7, 8));
    }

    #[test]
    fn depth_zero_draws_one_leaf() {
        let cfg = TreeConfig { depth: 0, ..Default::default() };
        let s = draw(&cfg);
        assert_eq!(s.count(|c| matches!(c, Command::Forward(_))), 1);
        assert_eq!(s.count(|c| matches!(c, Command::Backward(_))), 1);
        assert_eq!(s.count(|c| matches!(c, Command::Color(_))), 1);
    }

    #[test]
    fn starts_with_background_and_root_cursor() {
        let s = draw(&golden(DrawMode::Line));
        let bg = PaletteBook::default().get("Classic").background;
        assert_eq!(
            &s.commands[..3],
            &[Command::Background(bg), Command::MoveTo(Point::ORIGIN), Command::Heading(90.0)]
        );
    }

    #[test]
    fn cursor_returns_to_origin() {
        for mode in [DrawMode::Line, DrawMode::Square] {
            for depth in [0, 1, 6, 10] {
                let cfg = TreeConfig { depth, randomness: 0.6, seed: 77, draw_mode: mode, ..Default::default() };
                let s = draw(&cfg);
                assert!(s.cursor.pos.distance(Point::ORIGIN) < 1e-9, "{mode:?} depth {depth}");
                assert_eq!(s.cursor.heading, 90.0);
            }
        }
    }

    #[test]
    fn square_mode_only_stamps() {
        let s = draw(&golden(DrawMode::Square));
        assert_eq!(s.count(|c| matches!(c, Command::Forward(_) | Command::Backward(_))), 0);
        assert!(s.count(|c| matches!(c, Command::Stamp(..))) > 15);
    }

    #[test]
    fn everything_drawn_is_inside_estimated_bounds() {
        let book = PaletteBook::default();
        for mode in [DrawMode::Line, DrawMode::Square] {
            for seed in [0, 3, 1234] {
                let cfg = TreeConfig {
                    depth: 9,
                    randomness: 0.9,
                    thickness: 30.0,
                    thickness_decay: 0.9,
                    seed,
                    draw_mode: mode,
                    ..Default::default()
                };
                let bbox = estimate_bounds(&cfg, &book).pad(1e-9);
                let s = draw(&cfg);
                assert!(!s.touched.is_empty());
                for p in &s.touched {
                    assert!(bbox.contains(*p), "{mode:?} seed {seed}: {p:?} outside {bbox:?}");
                }
            }
        }
    }

    #[test]
    fn repeated_renders_are_identical() {
        let cfg = TreeConfig { depth: 7, randomness: 1.0, seed: 5, ..Default::default() };
        assert_eq!(draw(&cfg).commands, draw(&cfg).commands);
    }

    #[test]
    fn unavailable_surface_aborts_before_drawing() {
        let mut surface = RecordingSurface::new(0, 0);
        let err = render(&TreeConfig::default(), &PaletteBook::default(), &mut surface);
        assert!(matches!(err, Err(Error::SurfaceUnavailable(_))));
        assert!(surface.commands.is_empty());
    }
}
