//! Pixel coverage for strokes and squares, shared by the pixel-grid canvases.
//! A pixel is covered when its center falls inside the shape.

use crate::tree::geometry::Point;

/// Thinnest stroke half-width that still yields a connected line
const MIN_HALF_WIDTH: f64 = 0.75;

/// Cover a round-capped stroke of `width` pixels from `a` to `b`
pub fn stroke(a: Point, b: Point, width: f64, size: (u32, u32), mut plot: impl FnMut(u32, u32)) {
    let r = (width / 2.0).max(MIN_HALF_WIDTH);
    let span = pixel_span(a.x.min(b.x) - r, a.x.max(b.x) + r, size.0);
    let rows = pixel_span(a.y.min(b.y) - r, a.y.max(b.y) + r, size.1);

    for py in rows {
        for px in span.clone() {
            let c = Point::new(f64::from(px) + 0.5, f64::from(py) + 0.5);
            if distance_to_segment(c, a, b) <= r {
                plot(px, py);
            }
        }
    }
}

/// Cover an axis-aligned square; at least the pixel under `center` is hit
pub fn square(center: Point, half_side: f64, size: (u32, u32), mut plot: impl FnMut(u32, u32)) {
    let h = half_side.max(0.5);
    for py in pixel_span(center.y - h, center.y + h, size.1) {
        for px in pixel_span(center.x - h, center.x + h, size.0) {
            plot(px, py);
        }
    }
}

/// Pixels whose centers lie in `[lo, hi]`, clipped to `0..limit`
fn pixel_span(lo: f64, hi: f64, limit: u32) -> std::ops::Range<u32> {
    let first = (lo - 0.5).ceil().max(0.0);
    let last = ((hi - 0.5).floor() + 1.0).min(f64::from(limit));
    if first >= last {
        return 0..0;
    }
    first as u32..last as u32
}

fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len2 = dx * dx + dy * dy;
    if len2 == 0.0 {
        return p.distance(a);
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len2).clamp(0.0, 1.0);
    p.distance(Point::new(a.x + t * dx, a.y + t * dy))
}
