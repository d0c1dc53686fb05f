use tilepaint_core::{Color, TextureHandle};

use crate::error::SurfaceError;
use crate::grid::GridLayout;
use crate::viewport::ScreenRect;

/// The 2D drawing primitives the compositor issues against the host canvas.
pub trait DrawingSurface {
    /// Draw a texture stretched into `rect`.
    fn draw_image(&mut self, texture: TextureHandle, rect: ScreenRect) -> Result<(), SurfaceError>;
    fn fill_rect(&mut self, rect: ScreenRect, color: Color) -> Result<(), SurfaceError>;
    /// Multiply subsequent draws by `alpha` (0.0..=1.0).
    fn set_global_opacity(&mut self, alpha: f32) -> Result<(), SurfaceError>;
    /// Return to fully opaque drawing.
    fn reset_global_opacity(&mut self) -> Result<(), SurfaceError>;
}

/// Turns a grid layout into a texture the frame can blit.
pub trait GridRasterizer {
    fn rasterize_grid(&mut self, layout: &GridLayout) -> Result<TextureHandle, SurfaceError>;
}

/// Run `draw` with the surface alpha set to `opacity / 255`.
///
/// A fully opaque layer touches no opacity state. Otherwise the opacity is
/// reset after `draw` returns, whether it succeeded or not; the first error wins.
pub fn with_layer_opacity<S, T, F>(surface: &mut S, opacity: u8, draw: F) -> Result<T, SurfaceError>
where
    S: DrawingSurface + ?Sized,
    F: FnOnce(&mut S) -> Result<T, SurfaceError>,
{
    if opacity == u8::MAX {
        return draw(surface);
    }
    surface.set_global_opacity(opacity as f32 / 255.0)?;
    let result = draw(surface);
    let reset = surface.reset_global_opacity();
    let value = result?;
    reset?;
    Ok(value)
}
