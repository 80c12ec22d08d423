//! Dry-run pass that measures a tree before it is drawn.

use super::geometry::{BBox, Point};
use super::traverse::{walk, Segment, TreeVisitor};
use crate::config::{DrawMode, TreeConfig};
use crate::palette::PaletteBook;

/// Accumulates the footprint of every segment the renderer will paint
pub struct BoundsEstimator {
    mode: DrawMode,
    bbox: BBox,
}

impl BoundsEstimator {
    pub fn new(mode: DrawMode) -> Self {
        Self { mode, bbox: BBox::at(Point::ORIGIN) }
    }

    pub fn finish(self) -> BBox {
        self.bbox
    }

    fn cover(&mut self, seg: &Segment) {
        match self.mode {
            DrawMode::Line => {
                self.bbox.expand(seg.start.pos);
                self.bbox.expand(seg.end().pos);
            }
            DrawMode::Square => {
                // Same centers the renderer stamps, not just the ends
                let run = seg.stamps();
                let half = run.half_side();
                for c in run.centers() {
                    self.bbox.expand_square(c, half);
                }
            }
        }
    }
}

impl TreeVisitor for BoundsEstimator {
    fn branch(&mut self, seg: &Segment) {
        self.cover(seg);
    }

    fn leaf(&mut self, seg: &Segment) {
        self.cover(seg);
    }
}

/// Logical-space box holding everything `render` will draw for `cfg`
pub fn estimate_bounds(cfg: &TreeConfig, palettes: &PaletteBook) -> BBox {
    let mut estimator = BoundsEstimator::new(cfg.draw_mode);
    walk(cfg, palettes.get(&cfg.palette_name), &mut estimator);
    let bbox = estimator.finish();
    tracing::debug!(?bbox, depth = cfg.depth, seed = cfg.seed, "estimated tree bounds");
    bbox
}
