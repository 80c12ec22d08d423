use crate::config::TreeConfig;
use crate::error::Result;
use crate::palette::PaletteBook;
use crate::surface::DrawingSurface;
use crate::tree::{estimate_bounds, fit_viewport, render, BBox};

/// Logical padding around the tree. Line-mode bounds hold stroke endpoints only,
/// so the margin must cover half the trunk pen width or the trunk cap is clipped.
pub const DEFAULT_MARGIN: f64 = 20.0;

/// Full draw request: clear, measure, fit to the surface, paint, flush.
/// The fit is recomputed on every call so resizes and config edits take effect.
pub fn draw_scene<S: DrawingSurface + ?Sized>(
    cfg: &TreeConfig,
    palettes: &PaletteBook,
    surface: &mut S,
    margin: f64,
) -> Result<BBox> {
    surface.ready()?;
    surface.clear();

    let bbox = estimate_bounds(cfg, palettes);
    let (w, h) = surface.size();
    let transform = fit_viewport(&bbox, margin, w, h);
    tracing::debug!(scale = transform.scale(), window = ?transform.window(), "scene fitted");
    surface.set_transform(transform);

    render(cfg, palettes, surface)?;
    surface.present()?;
    Ok(bbox)
}
