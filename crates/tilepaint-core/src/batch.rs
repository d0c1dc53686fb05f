use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::{Bounds, Color};

/// Unique batch identifier. The renderer matches the actively drawn batch by id.
pub type BatchId = Uuid;

/// Opaque handle to a texture owned by the host's drawing backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextureHandle(pub u64);

/// What a batch contributes when composited.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BatchKind {
    /// Painted pixels.
    Content { texture: TextureHandle },
    /// Removes pixels underneath. Applied regardless of the undo position.
    Eraser { texture: TextureHandle },
    /// Flat color covering the whole viewport.
    Background { color: Color },
}

/// A contiguous run of painted pixels rendered as one texture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Batch {
    pub id: BatchId,
    /// Extent in tile units, relative to the owning layer.
    pub bounds: Bounds,
    pub kind: BatchKind,
    /// Number of pixels currently held by the batch.
    pub pixel_count: u32,
}

impl Batch {
    fn with_kind(bounds: Bounds, kind: BatchKind, pixel_count: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            bounds,
            kind,
            pixel_count,
        }
    }

    pub fn content(bounds: Bounds, texture: TextureHandle) -> Self {
        let pixels = bounds.w.saturating_mul(bounds.h);
        Self::with_kind(bounds, BatchKind::Content { texture }, pixels)
    }

    pub fn eraser(bounds: Bounds, texture: TextureHandle) -> Self {
        let pixels = bounds.w.saturating_mul(bounds.h);
        Self::with_kind(bounds, BatchKind::Eraser { texture }, pixels)
    }

    /// `bounds` only feeds the layer extent; the fill always covers the viewport.
    pub fn background(bounds: Bounds, color: Color) -> Self {
        let pixels = bounds.w.saturating_mul(bounds.h);
        Self::with_kind(bounds, BatchKind::Background { color }, pixels)
    }

    pub fn with_pixel_count(mut self, pixel_count: u32) -> Self {
        self.pixel_count = pixel_count;
        self
    }

    pub fn is_eraser(&self) -> bool {
        matches!(self.kind, BatchKind::Eraser { .. })
    }

    pub fn is_empty(&self) -> bool {
        self.pixel_count == 0
    }
}
