use serde::{Deserialize, Serialize};
use tilepaint_core::Bounds;

use crate::error::RenderError;

/// Size of one tile in world pixels at zoom 1.
pub const DEFAULT_TILE_SIZE: f64 = 8.0;
pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 64.0;

/// A rectangle in screen pixels. The origin is whole pixels, the extent keeps
/// sub-pixel precision so zooming stays smooth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenRect {
    pub x: i32,
    pub y: i32,
    pub w: f64,
    pub h: f64,
}

impl ScreenRect {
    pub fn new(x: i32, y: i32, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f64 {
        self.x as f64 + self.w
    }

    pub fn bottom(&self) -> f64 {
        self.y as f64 + self.h
    }
}

/// Pan, zoom and canvas size of the drawing area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Screen position of the world origin, in pixels.
    pub pan_x: f64,
    pub pan_y: f64,
    /// Screen pixels per world pixel.
    pub zoom: f64,
    /// Canvas width in pixels.
    pub canvas_width: f64,
    /// Canvas height in pixels.
    pub canvas_height: f64,
    /// World pixels per tile.
    pub tile_size: f64,
}

impl Viewport {
    pub fn new(canvas_width: f64, canvas_height: f64) -> Self {
        Self {
            pan_x: 0.0,
            pan_y: 0.0,
            zoom: 1.0,
            canvas_width,
            canvas_height,
            tile_size: DEFAULT_TILE_SIZE,
        }
    }

    /// Pan offset truncated to whole pixels.
    pub fn pixel_offset(&self) -> (i32, i32) {
        (self.pan_x as i32, self.pan_y as i32)
    }

    /// Size of one tile on screen.
    pub fn tile_extent(&self) -> f64 {
        self.tile_size * self.zoom
    }

    /// Map a tile-space rectangle to screen pixels.
    pub fn tile_to_screen(&self, tile_x: f64, tile_y: f64, tile_w: f64, tile_h: f64) -> ScreenRect {
        let (cx, cy) = self.pixel_offset();
        let scale = self.tile_extent();
        ScreenRect {
            x: (cx as f64 + tile_x * scale) as i32,
            y: (cy as f64 + tile_y * scale) as i32,
            w: tile_w * scale,
            h: tile_h * scale,
        }
    }

    pub fn bounds_to_screen(&self, bounds: &Bounds) -> ScreenRect {
        self.tile_to_screen(
            bounds.x as f64,
            bounds.y as f64,
            bounds.w as f64,
            bounds.h as f64,
        )
    }

    /// Tile containing the given screen position, rounded down.
    pub fn pointer_to_tile(&self, screen_x: f64, screen_y: f64) -> (i32, i32) {
        let (cx, cy) = self.pixel_offset();
        let scale = self.tile_extent();
        (
            ((screen_x - cx as f64) / scale).floor() as i32,
            ((screen_y - cy as f64) / scale).floor() as i32,
        )
    }

    /// The whole canvas as a screen rectangle.
    pub fn canvas_rect(&self) -> ScreenRect {
        ScreenRect::new(0, 0, self.canvas_width, self.canvas_height)
    }

    /// Pan the viewport by a delta in screen pixels.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Zoom in/out keeping the world point under the cursor fixed.
    pub fn zoom_at(&mut self, screen_x: f64, screen_y: f64, factor: f64) {
        let world_x = (screen_x - self.pan_x) / self.zoom;
        let world_y = (screen_y - self.pan_y) / self.zoom;

        self.zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);

        self.pan_x = screen_x - world_x * self.zoom;
        self.pan_y = screen_y - world_y * self.zoom;
    }

    pub fn resize(&mut self, canvas_width: f64, canvas_height: f64) {
        self.canvas_width = canvas_width;
        self.canvas_height = canvas_height;
    }

    /// Check the state a render pass depends on.
    pub fn validate(&self) -> Result<(), RenderError> {
        if !self.zoom.is_finite() || self.zoom <= 0.0 {
            return Err(RenderError::InvalidViewport("zoom must be finite and positive"));
        }
        if !self.pan_x.is_finite() || !self.pan_y.is_finite() {
            return Err(RenderError::InvalidViewport("pan offset must be finite"));
        }
        if !self.tile_size.is_finite() || self.tile_size <= 0.0 {
            return Err(RenderError::InvalidViewport("tile size must be finite and positive"));
        }
        if !(self.canvas_width >= 0.0 && self.canvas_height >= 0.0) {
            return Err(RenderError::InvalidViewport("canvas size must be non-negative"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_to_screen_truncates_origin_only() {
        let mut vp = Viewport::new(800.0, 600.0);
        vp.pan_x = 10.7;
        vp.pan_y = -3.2;
        vp.zoom = 1.5;
        let rect = vp.tile_to_screen(1.0, 1.0, 1.0, 2.0);
        // pan truncates to (10, -3); 1 tile = 12px
        assert_eq!(rect.x, 22);
        assert_eq!(rect.y, 9);
        assert!((rect.w - 12.0).abs() < 1e-10);
        assert!((rect.h - 24.0).abs() < 1e-10);

        let rect = vp.tile_to_screen(0.1, 0.0, 0.1, 0.1);
        assert_eq!(rect.x, 11);
        assert!((rect.w - 1.2).abs() < 1e-10);
    }

    #[test]
    fn test_pointer_to_tile_floors() {
        let mut vp = Viewport::new(800.0, 600.0);
        vp.pan_x = 4.0;
        vp.zoom = 2.0;
        // tile extent is 16px
        assert_eq!(vp.pointer_to_tile(4.0, 0.0), (0, 0));
        assert_eq!(vp.pointer_to_tile(19.9, 15.9), (0, 0));
        assert_eq!(vp.pointer_to_tile(20.0, 16.0), (1, 1));
        assert_eq!(vp.pointer_to_tile(3.0, -1.0), (-1, -1));
    }

    #[test]
    fn test_zoom_at_keeps_cursor_fixed() {
        let mut vp = Viewport::new(800.0, 600.0);
        vp.pan(100.0, 50.0);
        let before = ((300.0 - vp.pan_x) / vp.zoom, (200.0 - vp.pan_y) / vp.zoom);
        vp.zoom_at(300.0, 200.0, 2.0);
        let after = ((300.0 - vp.pan_x) / vp.zoom, (200.0 - vp.pan_y) / vp.zoom);
        assert!((before.0 - after.0).abs() < 1e-10);
        assert!((before.1 - after.1).abs() < 1e-10);
        assert!((vp.zoom - 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut vp = Viewport::new(800.0, 600.0);
        vp.zoom_at(0.0, 0.0, 1e9);
        assert_eq!(vp.zoom, MAX_ZOOM);
        vp.zoom_at(0.0, 0.0, 1e-12);
        assert_eq!(vp.zoom, MIN_ZOOM);
    }

    #[test]
    fn test_validate_rejects_bad_zoom() {
        let mut vp = Viewport::new(800.0, 600.0);
        assert!(vp.validate().is_ok());
        vp.zoom = 0.0;
        assert!(vp.validate().is_err());
        vp.zoom = f64::NAN;
        assert!(vp.validate().is_err());
    }
}
