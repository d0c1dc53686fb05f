use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tilepaint_core::Color;

use crate::error::ConfigError;

/// Styling and debug switches for the canvas renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Width of grid lines in screen pixels.
    pub grid_line_width: f64,
    pub grid_color: Color,
    /// Used when the scene supplies no background texture.
    pub background_color: Color,
    pub hover_color: Color,
    /// Committed selection.
    pub selection_color: Color,
    /// Selection while the drag is in progress.
    pub selection_active_color: Color,
    pub bounding_color: Color,
    /// Outline every drawn layer and batch.
    pub debug_bounds: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            grid_line_width: 1.0,
            grid_color: Color::rgba(255, 255, 255, 0.1),
            background_color: Color::rgb(32, 32, 32),
            hover_color: Color::rgba(255, 255, 255, 0.2),
            selection_color: Color::rgba(0, 120, 255, 0.25),
            selection_active_color: Color::rgba(255, 255, 255, 0.35),
            bounding_color: Color::rgba(255, 0, 0, 0.5),
            debug_bounds: false,
        }
    }
}

impl RenderConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.grid_line_width.is_finite() || self.grid_line_width < 0.0 {
            return Err(ConfigError::InvalidLineWidth(self.grid_line_width));
        }
        Ok(())
    }
}
