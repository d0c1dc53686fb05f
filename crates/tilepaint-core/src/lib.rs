//! # Tilepaint Core
//!
//! Scene model shared between the Tilepaint editor and its canvas renderer:
//! layers, paint batches, the selection rectangle and interaction flags.
//!
//! The renderer only reads these types; mutation belongs to the editor's
//! tools and history.

pub mod geometry;
pub mod batch;
pub mod layer;
pub mod selection;

pub use geometry::{Bounds, Color};
pub use batch::{Batch, BatchId, BatchKind, TextureHandle};
pub use layer::{Layer, LayerId};
pub use selection::{InteractionState, Selection, SelectionRect};
