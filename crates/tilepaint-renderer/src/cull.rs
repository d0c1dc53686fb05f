use tilepaint_core::Bounds;

use crate::viewport::{ScreenRect, Viewport};

/// Whether a tile-space rectangle overlaps the visible canvas.
///
/// Empty bounds are never visible. Partial overlap counts as visible; the
/// culler never clips.
pub fn is_visible(bounds: &Bounds, viewport: &Viewport) -> bool {
    if bounds.is_empty() {
        return false;
    }
    screen_rect_visible(&viewport.bounds_to_screen(bounds), viewport)
}

pub fn screen_rect_visible(rect: &ScreenRect, viewport: &Viewport) -> bool {
    rect.w > 0.0
        && rect.h > 0.0
        && (rect.x as f64) < viewport.canvas_width
        && rect.right() > 0.0
        && (rect.y as f64) < viewport.canvas_height
        && rect.bottom() > 0.0
}
