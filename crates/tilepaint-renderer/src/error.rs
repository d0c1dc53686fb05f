use std::io;

use thiserror::Error;
use tilepaint_core::TextureHandle;

// ── Errors ────────────────────────────────────────────────────────────

/// Failure reported by a host drawing backend.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SurfaceError {
    #[error("Unknown texture handle {0:?}")]
    UnknownTexture(TextureHandle),

    #[error("Drawing backend failure: {0}")]
    Backend(String),
}

/// Failure of a render pass. The pass is abandoned; the next frame redraws everything.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("Invalid viewport: {0}")]
    InvalidViewport(&'static str),

    #[error("Surface error: {0}")]
    Surface(#[from] SurfaceError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid render config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Grid line width must be finite and non-negative, got {0}")]
    InvalidLineWidth(f64),
}
