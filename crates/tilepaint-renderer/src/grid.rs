use serde::{Deserialize, Serialize};
use tilepaint_core::{Color, TextureHandle};

use crate::config::RenderConfig;
use crate::error::SurfaceError;
use crate::surface::GridRasterizer;
use crate::viewport::Viewport;

/// Geometry of the tile grid as it appears on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridLayout {
    /// Screen position of the first vertical/horizontal line, in `0..cell_size`.
    pub origin_x: f64,
    pub origin_y: f64,
    /// Distance between lines in screen pixels.
    pub cell_size: f64,
    pub line_width: f64,
    pub width: f64,
    pub height: f64,
    pub color: Color,
}

impl GridLayout {
    pub fn for_viewport(viewport: &Viewport, config: &RenderConfig) -> Self {
        let cell_size = viewport.tile_extent();
        let (cx, cy) = viewport.pixel_offset();
        Self {
            origin_x: (cx as f64).rem_euclid(cell_size),
            origin_y: (cy as f64).rem_euclid(cell_size),
            cell_size,
            line_width: config.grid_line_width,
            width: viewport.canvas_width,
            height: viewport.canvas_height,
            color: config.grid_color,
        }
    }

    /// X positions of the vertical lines crossing the canvas.
    pub fn columns(&self) -> impl Iterator<Item = f64> + '_ {
        line_positions(self.origin_x, self.cell_size, self.width)
    }

    /// Y positions of the horizontal lines crossing the canvas.
    pub fn rows(&self) -> impl Iterator<Item = f64> + '_ {
        line_positions(self.origin_y, self.cell_size, self.height)
    }
}

fn line_positions(origin: f64, step: f64, limit: f64) -> impl Iterator<Item = f64> {
    (0u32..)
        .map(move |i| origin + i as f64 * step)
        .take_while(move |&p| step > 0.0 && p < limit)
}

/// The rasterized grid and the pan offset it was built for.
#[derive(Debug, Clone, Default)]
pub struct GridCache {
    texture: Option<TextureHandle>,
    built_at: Option<(i32, i32)>,
    dirty: bool,
}

impl GridCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn texture(&self) -> Option<TextureHandle> {
        self.texture
    }

    /// Force a rebuild on the next frame.
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    /// True when the truncated pan offset moved since the last build, nothing
    /// has been built yet, or the cache was invalidated.
    pub fn needs_rebuild(&self, viewport: &Viewport) -> bool {
        self.dirty || self.texture.is_none() || self.built_at != Some(viewport.pixel_offset())
    }

    pub fn rebuild<R>(
        &mut self,
        rasterizer: &mut R,
        viewport: &Viewport,
        config: &RenderConfig,
    ) -> Result<TextureHandle, SurfaceError>
    where
        R: GridRasterizer + ?Sized,
    {
        let layout = GridLayout::for_viewport(viewport, config);
        let offset = viewport.pixel_offset();
        log::debug!(
            "Rebuilding grid texture at offset ({}, {}), cell size {}",
            offset.0,
            offset.1,
            layout.cell_size
        );
        let texture = rasterizer.rasterize_grid(&layout)?;
        self.texture = Some(texture);
        self.built_at = Some(offset);
        self.dirty = false;
        Ok(texture)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render_data::CommandList;

    #[test]
    fn test_layout_origin_wraps_pan() {
        let mut vp = Viewport::new(64.0, 32.0);
        vp.pan(-3.6, 21.0);
        let layout = GridLayout::for_viewport(&vp, &RenderConfig::default());
        // pan truncates to (-3, 21), cells are 8px
        assert!((layout.origin_x - 5.0).abs() < 1e-10);
        assert!((layout.origin_y - 5.0).abs() < 1e-10);
        let columns: Vec<f64> = layout.columns().collect();
        assert_eq!(columns, vec![5.0, 13.0, 21.0, 29.0, 37.0, 45.0, 53.0, 61.0]);
        assert_eq!(layout.rows().count(), 4);
    }

    #[test]
    fn test_cache_rebuilds_only_on_offset_change() {
        let config = RenderConfig::default();
        let mut list = CommandList::new();
        let mut cache = GridCache::new();
        let mut vp = Viewport::new(64.0, 64.0);

        assert!(cache.needs_rebuild(&vp));
        cache.rebuild(&mut list, &vp, &config).unwrap();
        assert!(!cache.needs_rebuild(&vp));

        // sub-pixel pan keeps the truncated offset
        vp.pan(0.4, 0.4);
        assert!(!cache.needs_rebuild(&vp));

        vp.pan(1.0, 0.0);
        assert!(cache.needs_rebuild(&vp));
    }

    #[test]
    fn test_invalidate_forces_rebuild() {
        let config = RenderConfig::default();
        let mut list = CommandList::new();
        let mut cache = GridCache::new();
        let vp = Viewport::new(64.0, 64.0);
        let first = cache.rebuild(&mut list, &vp, &config).unwrap();
        cache.invalidate();
        assert!(cache.needs_rebuild(&vp));
        let second = cache.rebuild(&mut list, &vp, &config).unwrap();
        assert_ne!(first, second);
        assert_eq!(cache.texture(), Some(second));
    }
}
