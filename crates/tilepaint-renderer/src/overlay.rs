//! Hover tile and selection rectangle.

use serde::{Deserialize, Serialize};
use tilepaint_core::{Color, InteractionState, Selection, SelectionRect};

use crate::config::RenderConfig;
use crate::error::SurfaceError;
use crate::surface::DrawingSurface;
use crate::viewport::{ScreenRect, Viewport};

/// Pointer location in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: f64,
    pub y: f64,
}

impl PointerPosition {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The select tool hides the hover tile while a selection exists.
pub fn hover_suppressed(state: &InteractionState, selection: &Selection) -> bool {
    state.select && selection.is_present()
}

/// One tile under the pointer, inset by half a grid line so it sits inside the cell border.
pub fn hover_rect(viewport: &Viewport, pointer: PointerPosition, grid_line_width: f64) -> ScreenRect {
    let (tile_x, tile_y) = viewport.pointer_to_tile(pointer.x, pointer.y);
    let (cx, cy) = viewport.pixel_offset();
    let scale = viewport.tile_extent();
    let inset = grid_line_width / 2.0;
    let size = scale.trunc();
    ScreenRect {
        x: (cx as f64 + inset + tile_x as f64 * scale) as i32,
        y: (cy as f64 + inset + tile_y as f64 * scale) as i32,
        w: size,
        h: size,
    }
}

/// Screen rectangle of a selection, normalized so the extent is non-negative.
pub fn selection_rect(viewport: &Viewport, rect: &SelectionRect) -> ScreenRect {
    let (cx, cy) = viewport.pixel_offset();
    let scale = viewport.tile_extent();
    let mut x = (cx as f64 + rect.x as f64 * scale) as i32;
    let mut y = (cy as f64 + rect.y as f64 * scale) as i32;
    let mut w = (rect.w as f64 * scale) as i32;
    let mut h = (rect.h as f64 * scale) as i32;
    if w < 0 {
        x += w;
        w = -w;
    }
    if h < 0 {
        y += h;
        h = -h;
    }
    ScreenRect::new(x, y, w as f64, h as f64)
}

pub fn selection_color(state: &InteractionState, config: &RenderConfig) -> Color {
    if state.selecting {
        config.selection_active_color
    } else {
        config.selection_color
    }
}

pub fn draw_hover<S>(
    surface: &mut S,
    viewport: &Viewport,
    pointer: PointerPosition,
    config: &RenderConfig,
) -> Result<(), SurfaceError>
where
    S: DrawingSurface + ?Sized,
{
    let rect = hover_rect(viewport, pointer, config.grid_line_width);
    surface.fill_rect(rect, config.hover_color)
}

pub fn draw_selection<S>(
    surface: &mut S,
    viewport: &Viewport,
    rect: &SelectionRect,
    state: &InteractionState,
    config: &RenderConfig,
) -> Result<(), SurfaceError>
where
    S: DrawingSurface + ?Sized,
{
    surface.fill_rect(selection_rect(viewport, rect), selection_color(state, config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hover_suppressed_only_in_select_mode_with_selection() {
        let select = InteractionState {
            select: true,
            selecting: false,
        };
        let sel = Selection::rect(0, 0, 2, 2);
        assert!(hover_suppressed(&select, &sel));
        assert!(!hover_suppressed(&select, &Selection::None));
        assert!(!hover_suppressed(&InteractionState::default(), &sel));
    }

    #[test]
    fn test_hover_rect_snaps_to_tile() {
        let mut vp = Viewport::new(200.0, 200.0);
        vp.pan(10.0, 20.0);
        vp.zoom = 1.5;
        // tile extent 12px; pointer lands in tile (2, -1)
        let rect = hover_rect(&vp, PointerPosition::new(40.0, 15.0), 1.0);
        assert_eq!(rect, ScreenRect::new(34, 8, 12.0, 12.0));
    }

    #[test]
    fn test_hover_size_truncates() {
        let mut vp = Viewport::new(200.0, 200.0);
        vp.zoom = 1.3;
        let rect = hover_rect(&vp, PointerPosition::new(0.0, 0.0), 0.0);
        assert_eq!(rect.w, 10.0);
        assert_eq!(rect.h, 10.0);
    }

    #[test]
    fn test_selection_rect_normalizes_negative_drag() {
        let vp = Viewport::new(200.0, 200.0);
        let rect = selection_rect(&vp, &SelectionRect::new(4, 4, -2, 3));
        assert_eq!(rect, ScreenRect::new(16, 32, 16.0, 24.0));
    }

    #[test]
    fn test_zero_width_selection_rect() {
        let vp = Viewport::new(200.0, 200.0);
        let rect = selection_rect(&vp, &SelectionRect::new(1, 1, 0, 5));
        assert_eq!(rect, ScreenRect::new(8, 8, 0.0, 40.0));
    }

    #[test]
    fn test_selection_color_follows_drag_state() {
        let config = RenderConfig::default();
        let mut state = InteractionState::default();
        assert_eq!(selection_color(&state, &config), config.selection_color);
        state.selecting = true;
        assert_eq!(selection_color(&state, &config), config.selection_active_color);
    }
}
