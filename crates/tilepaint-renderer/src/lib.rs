//! # Tilepaint Renderer
//!
//! Per-frame compositing for the Tilepaint canvas: background, tile grid,
//! paint layers built from texture batches, the hover tile and the selection
//! rectangle.
//!
//! The renderer never owns pixels. It issues draw calls against a host
//! [`DrawingSurface`]; [`CommandList`] records them as serializable
//! [`DrawCall`]s for a frontend canvas to replay.

pub mod compositor;
pub mod config;
pub mod cull;
pub mod error;
pub mod frame;
pub mod grid;
pub mod overlay;
pub mod render_data;
pub mod surface;
pub mod viewport;

pub use config::RenderConfig;
pub use error::{ConfigError, RenderError, SurfaceError};
pub use frame::{CanvasRenderer, FrameStats, Scene};
pub use render_data::{CommandList, DrawCall};
pub use surface::{DrawingSurface, GridRasterizer};
pub use viewport::{ScreenRect, Viewport};
