use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::batch::Batch;
use crate::geometry::Bounds;

/// Unique layer identifier.
pub type LayerId = Uuid;

/// A paintable layer. Batches are stored in paint order: later batches paint on top.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layer {
    pub id: LayerId,
    pub name: String,
    /// Positional offset in tiles, applied uniformly to every batch.
    pub x: i32,
    pub y: i32,
    /// Extent of all batches in tile units, offset included.
    pub bounds: Bounds,
    /// 255 is fully opaque.
    pub opacity: u8,
    pub hidden: bool,
    pub batches: Vec<Batch>,
}

impl Layer {
    pub fn new(name: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            x: 0,
            y: 0,
            bounds: Bounds::default(),
            opacity: 255,
            hidden: false,
            batches: Vec::new(),
        }
    }

    pub fn with_offset(mut self, x: i32, y: i32) -> Self {
        self.x = x;
        self.y = y;
        self.update_bounds();
        self
    }

    pub fn with_opacity(mut self, opacity: u8) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn push_batch(&mut self, batch: Batch) {
        self.batches.push(batch);
        self.update_bounds();
    }

    /// Recompute `bounds` from the batches.
    pub fn update_bounds(&mut self) {
        self.bounds = self
            .batches
            .iter()
            .fold(Bounds::default(), |acc, b| {
                acc.union(&b.bounds.translate(self.x, self.y))
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::TextureHandle;
    use crate::geometry::Color;

    #[test]
    fn test_layer_bounds_include_offset() {
        let mut layer = Layer::new("ink").with_offset(10, -2);
        layer.push_batch(Batch::content(Bounds::new(0, 0, 2, 2), TextureHandle(1)));
        layer.push_batch(Batch::content(Bounds::new(4, 4, 1, 1), TextureHandle(2)));
        assert_eq!(layer.bounds, Bounds::new(10, -2, 5, 5));
    }

    #[test]
    fn test_layer_bounds_skip_empty_batches() {
        let mut layer = Layer::new("bg");
        layer.push_batch(Batch::content(Bounds::new(3, 3, 0, 0), TextureHandle(1)));
        assert!(layer.bounds.is_empty());
        layer.push_batch(Batch::background(Bounds::new(0, 0, 32, 32), Color::WHITE));
        assert_eq!(layer.bounds, Bounds::new(0, 0, 32, 32));
    }
}
