//! Layer and batch compositing.
//!
//! Layers paint in sequence order and batches paint in layer order. The undo
//! cursor ("stack index") hides batches past it, except erasers and the
//! batch the user is currently drawing.

use tilepaint_core::{Batch, BatchId, BatchKind, Layer};

use crate::config::RenderConfig;
use crate::cull::is_visible;
use crate::error::SurfaceError;
use crate::frame::FrameStats;
use crate::surface::{with_layer_opacity, DrawingSurface};
use crate::viewport::Viewport;

/// Read-only inputs shared by every layer of one pass.
#[derive(Debug, Clone, Copy)]
pub struct CompositeContext<'a> {
    pub viewport: &'a Viewport,
    pub config: &'a RenderConfig,
    /// Undo cursor. Batches at an index above it are undone; -1 undoes all.
    pub stack_index: i64,
    /// Batch receiving the in-progress stroke, if any.
    pub drawing: Option<BatchId>,
}

impl CompositeContext<'_> {
    fn is_drawing(&self, batch: &Batch) -> bool {
        self.drawing == Some(batch.id)
    }
}

/// Whether the batch at `batch_index` survives the undo cursor.
pub fn is_batch_live(batch_index: usize, stack_index: i64, is_eraser: bool, is_drawing: bool) -> bool {
    if is_eraser || is_drawing {
        return true;
    }
    stack_index >= batch_index as i64
}

/// Draw one layer's batches. Translucent layers are wrapped in an opacity scope.
pub fn composite_layer<S>(
    layer: &Layer,
    ctx: &CompositeContext<'_>,
    surface: &mut S,
    stats: &mut FrameStats,
) -> Result<(), SurfaceError>
where
    S: DrawingSurface + ?Sized,
{
    let viewport = ctx.viewport;
    with_layer_opacity(surface, layer.opacity, |surface| {
        for (index, batch) in layer.batches.iter().enumerate() {
            if !is_batch_live(index, ctx.stack_index, batch.is_eraser(), ctx.is_drawing(batch)) {
                stats.batches_undone += 1;
                continue;
            }
            let bounds = batch.bounds.translate(layer.x, layer.y);
            if !is_visible(&bounds, viewport) {
                stats.batches_culled += 1;
                continue;
            }
            let texture = match batch.kind {
                BatchKind::Background { color } => {
                    surface.fill_rect(viewport.canvas_rect(), color)?;
                    stats.batches_drawn += 1;
                    continue;
                }
                BatchKind::Eraser { .. } if ctx.config.debug_bounds && batch.is_empty() => continue,
                BatchKind::Content { texture } | BatchKind::Eraser { texture } => texture,
            };
            let rect = viewport.bounds_to_screen(&bounds);
            if ctx.config.debug_bounds {
                surface.fill_rect(rect, ctx.config.bounding_color)?;
            }
            surface.draw_image(texture, rect)?;
            stats.batches_drawn += 1;
        }
        Ok(())
    })
}

/// Draw layers in sequence order, skipping hidden and off-screen ones.
pub fn composite_layers<S>(
    layers: &[Layer],
    ctx: &CompositeContext<'_>,
    surface: &mut S,
    stats: &mut FrameStats,
) -> Result<(), SurfaceError>
where
    S: DrawingSurface + ?Sized,
{
    for layer in layers {
        if layer.hidden || !is_visible(&layer.bounds, ctx.viewport) {
            stats.layers_skipped += 1;
            continue;
        }
        if ctx.config.debug_bounds {
            let rect = ctx.viewport.bounds_to_screen(&layer.bounds);
            surface.fill_rect(rect, ctx.config.bounding_color)?;
        }
        composite_layer(layer, ctx, surface, stats)?;
        stats.layers_drawn += 1;
    }
    Ok(())
}
