use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tilepaint_core::{Color, TextureHandle};

use crate::error::SurfaceError;
use crate::grid::GridLayout;
use crate::surface::{DrawingSurface, GridRasterizer};
use crate::viewport::ScreenRect;

/// Grid textures allocated by a [`CommandList`] start here so they stay clear of host handles.
const FIRST_GRID_TEXTURE: u64 = 1 << 32;

/// One recorded drawing operation, ready to be replayed by a frontend canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCall {
    DrawImage { texture: TextureHandle, rect: ScreenRect },
    FillRect { rect: ScreenRect, color: Color },
    SetOpacity { alpha: f32 },
    ResetOpacity,
    RasterizeGrid { texture: TextureHandle, layout: GridLayout },
}

/// A drawing surface that records calls instead of touching pixels.
///
/// In strict mode, drawing a texture that was never registered fails with
/// [`SurfaceError::UnknownTexture`].
#[derive(Debug, Clone)]
pub struct CommandList {
    calls: Vec<DrawCall>,
    opacity: f32,
    known_textures: Option<HashSet<TextureHandle>>,
    next_grid_texture: u64,
}

impl CommandList {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            opacity: 1.0,
            known_textures: None,
            next_grid_texture: FIRST_GRID_TEXTURE,
        }
    }

    pub fn strict(textures: impl IntoIterator<Item = TextureHandle>) -> Self {
        Self {
            known_textures: Some(textures.into_iter().collect()),
            ..Self::new()
        }
    }

    pub fn register_texture(&mut self, texture: TextureHandle) {
        if let Some(known) = &mut self.known_textures {
            known.insert(texture);
        }
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Hand over the recorded calls, leaving the list empty for the next frame.
    pub fn take(&mut self) -> Vec<DrawCall> {
        std::mem::take(&mut self.calls)
    }

    /// Current global opacity.
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Textures drawn, in call order.
    pub fn drawn_textures(&self) -> Vec<TextureHandle> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::DrawImage { texture, .. } => Some(*texture),
                _ => None,
            })
            .collect()
    }

    /// Filled rectangles with their colors, in call order.
    pub fn fills(&self) -> Vec<(ScreenRect, Color)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::FillRect { rect, color } => Some((*rect, *color)),
                _ => None,
            })
            .collect()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.calls)
    }

    fn check_texture(&self, texture: TextureHandle) -> Result<(), SurfaceError> {
        match &self.known_textures {
            Some(known) if !known.contains(&texture) => Err(SurfaceError::UnknownTexture(texture)),
            _ => Ok(()),
        }
    }
}

impl Default for CommandList {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawingSurface for CommandList {
    fn draw_image(&mut self, texture: TextureHandle, rect: ScreenRect) -> Result<(), SurfaceError> {
        self.check_texture(texture)?;
        self.calls.push(DrawCall::DrawImage { texture, rect });
        Ok(())
    }

    fn fill_rect(&mut self, rect: ScreenRect, color: Color) -> Result<(), SurfaceError> {
        self.calls.push(DrawCall::FillRect { rect, color });
        Ok(())
    }

    fn set_global_opacity(&mut self, alpha: f32) -> Result<(), SurfaceError> {
        if !(0.0..=1.0).contains(&alpha) {
            return Err(SurfaceError::Backend(format!("opacity {alpha} out of range")));
        }
        self.opacity = alpha;
        self.calls.push(DrawCall::SetOpacity { alpha });
        Ok(())
    }

    fn reset_global_opacity(&mut self) -> Result<(), SurfaceError> {
        self.opacity = 1.0;
        self.calls.push(DrawCall::ResetOpacity);
        Ok(())
    }
}

impl GridRasterizer for CommandList {
    fn rasterize_grid(&mut self, layout: &GridLayout) -> Result<TextureHandle, SurfaceError> {
        let texture = TextureHandle(self.next_grid_texture);
        self.next_grid_texture += 1;
        self.register_texture(texture);
        self.calls.push(DrawCall::RasterizeGrid {
            texture,
            layout: layout.clone(),
        });
        Ok(texture)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_rejects_unknown_texture() {
        let mut list = CommandList::strict([TextureHandle(1)]);
        let rect = ScreenRect::new(0, 0, 8.0, 8.0);
        assert!(list.draw_image(TextureHandle(1), rect).is_ok());
        assert_eq!(
            list.draw_image(TextureHandle(2), rect),
            Err(SurfaceError::UnknownTexture(TextureHandle(2)))
        );
        assert_eq!(list.calls().len(), 1);
    }

    #[test]
    fn test_opacity_tracking() {
        let mut list = CommandList::new();
        list.set_global_opacity(0.5).unwrap();
        assert_eq!(list.opacity(), 0.5);
        list.reset_global_opacity().unwrap();
        assert_eq!(list.opacity(), 1.0);
        assert!(list.set_global_opacity(1.5).is_err());
    }

    #[test]
    fn test_calls_serialize_with_op_tag() {
        let mut list = CommandList::new();
        list.fill_rect(ScreenRect::new(1, 2, 3.0, 4.0), Color::WHITE).unwrap();
        list.reset_global_opacity().unwrap();
        let json: serde_json::Value = serde_json::from_str(&list.to_json().unwrap()).unwrap();
        assert_eq!(json[0]["op"], "fill_rect");
        assert_eq!(json[0]["rect"]["x"], 1);
        assert_eq!(json[1]["op"], "reset_opacity");
    }

    #[test]
    fn test_take_empties_list() {
        let mut list = CommandList::new();
        list.reset_global_opacity().unwrap();
        assert_eq!(list.take().len(), 1);
        assert!(list.calls().is_empty());
    }
}
