use std::path::Path;

use egui::Color32;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tool::ToolState;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Startup settings, read from an optional JSON file. Every field defaults
/// to the classic surface: an 800×600 white canvas and a small black
/// circle brush.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub canvas_size: [u32; 2],
    pub background: Color32,
    pub brush: ToolState,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            canvas_size: [800, 600],
            background: Color32::WHITE,
            brush: ToolState::default(),
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Read `path` if it exists, defaults otherwise. A present but
    /// malformed file is an error, not a silent fallback.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let config = Self::load(path)?;
            log::info!("loaded configuration from {}", path.display());
            Ok(config)
        } else {
            log::debug!("no configuration at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::BrushShape;

    #[test]
    fn defaults_match_the_classic_surface() {
        let config = AppConfig::default();
        assert_eq!(config.canvas_size, [800, 600]);
        assert_eq!(config.background, Color32::WHITE);
        assert_eq!(config.brush.brush_size(), 2);
        assert_eq!(config.brush.brush_shape(), BrushShape::Circle);
    }

    #[test]
    fn values_round_trip_through_json() {
        let mut config = AppConfig::default();
        config.canvas_size = [320, 240];
        config.brush.set_brush_size(9).unwrap();

        let text = serde_json::to_string(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn partial_json_fills_in_defaults() {
        let parsed: AppConfig = serde_json::from_str(r#"{"canvas_size": [100, 50]}"#).unwrap();
        assert_eq!(parsed.canvas_size, [100, 50]);
        assert_eq!(parsed.background, Color32::WHITE);
    }
}
