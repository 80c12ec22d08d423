//! Logical-space primitives shared by every tree pass.
//!
//! Logical space is y-up with headings in degrees: 0 points along +x,
//! 90 points up.

use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point `dist` units away along `heading_deg`
    pub fn toward(self, heading_deg: f64, dist: f64) -> Self {
        let (sin, cos) = heading_deg.to_radians().sin_cos();
        Self {
            x: self.x + cos * dist,
            y: self.y + sin * dist,
        }
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Position plus heading, passed by value down the recursion
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CursorState {
    pub pos: Point,
    pub heading: f64,
}

impl CursorState {
    /// Tree root: origin, facing up
    pub const ROOT: CursorState = CursorState { pos: Point::ORIGIN, heading: 90.0 };

    pub fn advanced(self, dist: f64) -> Self {
        Self {
            pos: self.pos.toward(self.heading, dist),
            heading: self.heading,
        }
    }

    /// Counter-clockwise turn by `deg` (negative turns clockwise)
    pub fn turned(self, deg: f64) -> Self {
        Self {
            pos: self.pos,
            heading: self.heading + deg,
        }
    }
}

/// Axis-aligned box that only grows
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BBox {
    pub minx: f64,
    pub miny: f64,
    pub maxx: f64,
    pub maxy: f64,
}

impl BBox {
    /// Degenerate box on a single point
    pub fn at(p: Point) -> Self {
        Self { minx: p.x, miny: p.y, maxx: p.x, maxy: p.y }
    }

    pub fn expand(&mut self, p: Point) {
        self.minx = self.minx.min(p.x);
        self.miny = self.miny.min(p.y);
        self.maxx = self.maxx.max(p.x);
        self.maxy = self.maxy.max(p.y);
    }

    /// Grow to cover an axis-aligned square of half side `half` centered on `c`
    pub fn expand_square(&mut self, c: Point, half: f64) {
        self.expand(Point::new(c.x - half, c.y - half));
        self.expand(Point::new(c.x + half, c.y + half));
    }

    pub fn pad(&self, p: f64) -> BBox {
        BBox {
            minx: self.minx - p,
            miny: self.miny - p,
            maxx: self.maxx + p,
            maxy: self.maxy + p,
        }
    }

    pub fn width(&self) -> f64 {
        (self.maxx - self.minx).max(1e-9)
    }

    pub fn height(&self) -> f64 {
        (self.maxy - self.miny).max(1e-9)
    }

    pub fn center(&self) -> Point {
        Point::new((self.minx + self.maxx) / 2.0, (self.miny + self.maxy) / 2.0)
    }

    pub fn contains(&self, p: Point) -> bool {
        (self.minx..=self.maxx).contains(&p.x) && (self.miny..=self.maxy).contains(&p.y)
    }
}
