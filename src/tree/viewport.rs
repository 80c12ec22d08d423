use super::geometry::{BBox, Point};

/// Uniform logical-to-device mapping. Device space is y-down, origin top-left.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    window: BBox,
    scale: f64,
}

impl Transform {
    pub fn apply(&self, p: Point) -> Point {
        Point {
            x: (p.x - self.window.minx) * self.scale,
            y: (self.window.maxy - p.y) * self.scale,
        }
    }

    pub fn scale_length(&self, d: f64) -> f64 {
        d * self.scale
    }

    /// Logical rectangle that maps onto the whole surface
    pub fn window(&self) -> BBox {
        self.window
    }

    /// Device pixels per logical unit
    pub fn scale(&self) -> f64 {
        self.scale
    }
}

/// Fit `bbox` plus `margin` logical units of padding onto a `width_px` x `height_px`
/// surface, centered and with the surface's aspect ratio.
pub fn fit_viewport(bbox: &BBox, margin: f64, width_px: u32, height_px: u32) -> Transform {
    let w_px = f64::from(width_px.max(1));
    let h_px = f64::from(height_px.max(1));
    let aspect = w_px / h_px;

    let padded = bbox.pad(margin);
    let (w, h) = (padded.width(), padded.height());
    let (win_w, win_h) = if w / h > aspect {
        (w, w / aspect)
    } else {
        (h * aspect, h)
    };

    let c = padded.center();
    let window = BBox {
        minx: c.x - win_w / 2.0,
        miny: c.y - win_h / 2.0,
        maxx: c.x + win_w / 2.0,
        maxy: c.y + win_h / 2.0,
    };
    let scale = w_px / win_w;
    tracing::debug!(?window, scale, width_px, height_px, "fitted viewport");

    Transform { window, scale }
}
