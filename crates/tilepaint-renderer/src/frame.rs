use serde::{Deserialize, Serialize};
use tilepaint_core::{BatchId, InteractionState, Layer, Selection, TextureHandle};

use crate::compositor::{composite_layers, CompositeContext};
use crate::config::RenderConfig;
use crate::error::RenderError;
use crate::grid::GridCache;
use crate::overlay::{draw_hover, draw_selection, hover_suppressed, PointerPosition};
use crate::surface::{DrawingSurface, GridRasterizer};
use crate::viewport::Viewport;

/// Everything a render pass reads, borrowed for the duration of the pass.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub viewport: &'a Viewport,
    pub layers: &'a [Layer],
    /// Undo cursor into the batch sequences. -1 means everything is undone.
    pub stack_index: i64,
    /// Batch receiving the in-progress stroke.
    pub drawing: Option<BatchId>,
    pub pointer: PointerPosition,
    pub selection: Selection,
    pub state: InteractionState,
    /// Stretched over the canvas before anything else; a flat fill is used when absent.
    pub background: Option<TextureHandle>,
}

impl<'a> Scene<'a> {
    pub fn new(viewport: &'a Viewport, layers: &'a [Layer]) -> Self {
        Self {
            viewport,
            layers,
            stack_index: i64::MAX,
            drawing: None,
            pointer: PointerPosition::default(),
            selection: Selection::None,
            state: InteractionState::default(),
            background: None,
        }
    }
}

/// What one render pass did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FrameStats {
    pub grid_rebuilt: bool,
    pub layers_drawn: u32,
    pub layers_skipped: u32,
    pub batches_drawn: u32,
    pub batches_culled: u32,
    pub batches_undone: u32,
    pub hover_drawn: bool,
    pub selection_drawn: bool,
}

/// Drives one compositing pass per frame and owns the cached grid texture.
#[derive(Debug, Clone)]
pub struct CanvasRenderer {
    config: RenderConfig,
    grid: GridCache,
}

impl CanvasRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self {
            config,
            grid: GridCache::new(),
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Replace the styling. The grid is rebuilt on the next frame.
    pub fn set_config(&mut self, config: RenderConfig) {
        self.config = config;
        self.mark_grid_dirty();
    }

    /// Rebuild the grid on the next frame, e.g. after a zoom or canvas resize.
    pub fn mark_grid_dirty(&mut self) {
        log::debug!("Grid texture invalidated");
        self.grid.invalidate();
    }

    pub fn grid_needs_rebuild(&self, viewport: &Viewport) -> bool {
        self.grid.needs_rebuild(viewport)
    }

    /// Composite a full frame: background, grid, layers, then hover or selection.
    pub fn render<S>(&mut self, scene: &Scene<'_>, surface: &mut S) -> Result<FrameStats, RenderError>
    where
        S: DrawingSurface + GridRasterizer + ?Sized,
    {
        let viewport = scene.viewport;
        viewport.validate()?;

        let mut stats = FrameStats::default();
        let grid_texture = match self.grid.texture() {
            Some(texture) if !self.grid.needs_rebuild(viewport) => texture,
            _ => {
                stats.grid_rebuilt = true;
                self.grid.rebuild(surface, viewport, &self.config)?
            }
        };

        let canvas = viewport.canvas_rect();
        match scene.background {
            Some(texture) => surface.draw_image(texture, canvas)?,
            None => surface.fill_rect(canvas, self.config.background_color)?,
        }
        surface.draw_image(grid_texture, canvas)?;

        let ctx = CompositeContext {
            viewport,
            config: &self.config,
            stack_index: scene.stack_index,
            drawing: scene.drawing,
        };
        composite_layers(scene.layers, &ctx, surface, &mut stats)?;

        if !hover_suppressed(&scene.state, &scene.selection) {
            draw_hover(surface, viewport, scene.pointer, &self.config)?;
            stats.hover_drawn = true;
        }
        if let Some(rect) = scene.selection.as_rect() {
            draw_selection(surface, viewport, rect, &scene.state, &self.config)?;
            stats.selection_drawn = true;
        }

        log::trace!("Frame rendered: {:?}", stats);
        Ok(stats)
    }
}

impl Default for CanvasRenderer {
    fn default() -> Self {
        Self::new(RenderConfig::default())
    }
}
