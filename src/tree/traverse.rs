//! The one branching recursion every pass goes through.
//!
//! Bounds estimation, rendering and counting are all [`TreeVisitor`]s over
//! [`walk`]. The walk owns the random stream, so every visitor sees the same
//! jitter samples in the same order for a given seed.

use super::geometry::{CursorState, Point};
use crate::colors::Rgb;
use crate::config::TreeConfig;
use crate::palette::Palette;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

pub const MIN_THICKNESS: f64 = 0.5;
pub const MAX_THICKNESS: f64 = 50.0;
/// Branches shorter than this end in a leaf regardless of depth
pub const MIN_BRANCH_LENGTH: f64 = 2.0;

/// Seeded sample source, one per top-level pass
pub struct RandomStream {
    rng: StdRng,
}

impl RandomStream {
    pub fn new(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }

    /// Uniform in `[lo, hi)`. Always consumes exactly one draw, even when `lo == hi`.
    pub fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.rng.gen::<f64>()
    }

    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        Some(&items[self.rng.gen_range(0..items.len())])
    }
}

/// Per-node randomized length and child angles
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Jitter {
    pub length: f64,
    pub left: f64,
    pub right: f64,
}

impl Jitter {
    /// Draws length, then left angle, then right angle
    pub fn sample(cfg: &TreeConfig, length: f64, stream: &mut RandomStream) -> Self {
        let angle_jitter = cfg.randomness * 10.0;
        let length_jitter = cfg.randomness * 0.15;

        let length = (length * (1.0 + stream.uniform(-length_jitter, length_jitter))).max(1.0);
        let left = cfg.angle_deg + stream.uniform(-angle_jitter, angle_jitter);
        let right = cfg.angle_deg + stream.uniform(-angle_jitter, angle_jitter);
        Self { length, left, right }
    }
}

pub fn clamp_thickness(t: f64) -> f64 {
    t.clamp(MIN_THICKNESS, MAX_THICKNESS)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SegmentKind {
    Branch,
    Leaf,
}

/// One painted segment: where it starts, how far it goes, how it looks
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub kind: SegmentKind,
    pub start: CursorState,
    pub length: f64,
    /// Node thickness, already clamped
    pub thickness: f64,
    pub color: Rgb,
}

impl Segment {
    pub fn end(&self) -> CursorState {
        self.start.advanced(self.length)
    }

    /// Stroke width in line mode
    pub fn pen_width(&self) -> f64 {
        self.thickness.max(1.0)
    }

    /// Stamp layout in square mode. Leaves use slightly smaller stamps.
    pub fn stamps(&self) -> StampRun {
        let thickness = match self.kind {
            SegmentKind::Branch => self.thickness,
            SegmentKind::Leaf => (self.thickness * 0.7).max(1.0),
        };
        StampRun {
            start: self.start.pos,
            heading: self.start.heading,
            length: self.length,
            step: (thickness * 0.9).max(4.0),
            scale: (thickness / 10.0).max(0.15),
        }
    }
}

/// Square stamps at the start of a segment and every `step` after it,
/// the last one landing on the segment end
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StampRun {
    pub start: Point,
    pub heading: f64,
    pub length: f64,
    pub step: f64,
    /// Size factor; a scale-1 stamp is 20 units on a side
    pub scale: f64,
}

impl StampRun {
    pub fn half_side(&self) -> f64 {
        10.0 * self.scale
    }

    pub fn centers(&self) -> StampCenters {
        StampCenters {
            run: *self,
            traveled: 0.0,
            remaining: self.length,
            started: false,
        }
    }
}

pub struct StampCenters {
    run: StampRun,
    traveled: f64,
    remaining: f64,
    started: bool,
}

impl Iterator for StampCenters {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if !self.started {
            self.started = true;
            return Some(self.run.start);
        }
        if self.remaining <= 0.0 {
            return None;
        }
        let d = self.run.step.min(self.remaining);
        self.traveled += d;
        self.remaining -= d;
        Some(self.run.start.toward(self.run.heading, self.traveled))
    }
}

/// Receives nodes in pre-order: parent, then the left subtree, then the right
pub trait TreeVisitor {
    fn branch(&mut self, seg: &Segment);

    /// Called once both subtrees of `seg` are done
    fn branch_done(&mut self, _seg: &Segment) {}

    fn leaf(&mut self, seg: &Segment);
}

/// Recursion frame; lives on the stack of one `visit` call
#[derive(Clone, Copy)]
struct BranchState {
    depth: u32,
    length: f64,
    thickness: f64,
    cursor: CursorState,
}

/// Walk the whole tree for `cfg`, starting at the origin facing up
pub fn walk<V: TreeVisitor + ?Sized>(cfg: &TreeConfig, palette: &Palette, visitor: &mut V) {
    let mut stream = RandomStream::new(cfg.seed);
    let root = BranchState {
        depth: cfg.depth,
        length: cfg.trunk_length,
        thickness: cfg.thickness,
        cursor: CursorState::ROOT,
    };
    visit(cfg, palette, &mut stream, root, visitor);
}

fn visit<V: TreeVisitor + ?Sized>(
    cfg: &TreeConfig,
    palette: &Palette,
    stream: &mut RandomStream,
    node: BranchState,
    visitor: &mut V,
) {
    let thickness = clamp_thickness(node.thickness);
    let jitter = Jitter::sample(cfg, node.length, stream);

    if node.depth == 0 || node.length < MIN_BRANCH_LENGTH {
        let color = stream
            .pick(&palette.leaf_colors)
            .copied()
            .unwrap_or(palette.trunk_color);
        visitor.leaf(&Segment {
            kind: SegmentKind::Leaf,
            start: node.cursor,
            length: jitter.length,
            thickness,
            color,
        });
        return;
    }

    let seg = Segment {
        kind: SegmentKind::Branch,
        start: node.cursor,
        length: jitter.length,
        thickness,
        color: palette.trunk_color,
    };
    visitor.branch(&seg);

    let tip = seg.end();
    let child = |cursor| BranchState {
        depth: node.depth - 1,
        length: jitter.length * cfg.shrink,
        thickness: thickness * cfg.thickness_decay,
        cursor,
    };
    visit(cfg, palette, stream, child(tip.turned(jitter.left)), visitor);
    visit(cfg, palette, stream, child(tip.turned(-jitter.right)), visitor);

    visitor.branch_done(&seg);
}

/// Counts nodes by kind
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Census {
    pub branches: u64,
    pub leaves: u64,
}

impl TreeVisitor for Census {
    fn branch(&mut self, _seg: &Segment) {
        self.branches += 1;
    }

    fn leaf(&mut self, _seg: &Segment) {
        self.leaves += 1;
    }
}

pub fn census(cfg: &TreeConfig, palette: &Palette) -> Census {
    let mut census = Census::default();
    walk(cfg, palette, &mut census);
    census
}
