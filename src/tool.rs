use egui::Color32;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Rejected brush configuration input. The previous value is always kept.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidBrushConfig {
    #[error("brush size must be positive, got {0}")]
    NonPositiveSize(i32),
    #[error("unknown brush shape {0:?}")]
    UnknownShape(String),
}

/// Whether drag samples paint marks or erase them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToolMode {
    Brush,
    Eraser,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrushShape {
    Circle,
    Rectangle,
    Square,
}

impl BrushShape {
    pub const ALL: [BrushShape; 3] = [BrushShape::Circle, BrushShape::Rectangle, BrushShape::Square];

    pub fn label(self) -> &'static str {
        match self {
            BrushShape::Circle => "Circle",
            BrushShape::Rectangle => "Rectangle",
            BrushShape::Square => "Square",
        }
    }
}

impl FromStr for BrushShape {
    type Err = InvalidBrushConfig;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "circle" => Ok(BrushShape::Circle),
            "rectangle" => Ok(BrushShape::Rectangle),
            "square" => Ok(BrushShape::Square),
            other => Err(InvalidBrushConfig::UnknownShape(other.to_owned())),
        }
    }
}

/// Current brush configuration. A single instance lives in the editor for
/// the whole session; brush settings are also persisted across restarts.
///
/// Invariant: `brush_size` is always positive. Setters reject bad input
/// without touching the stored value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolState {
    color: Color32,
    brush_size: i32,
    brush_shape: BrushShape,
    mode: ToolMode,
}

impl Default for ToolState {
    fn default() -> Self {
        Self {
            color: Color32::BLACK,
            brush_size: 2,
            brush_shape: BrushShape::Circle,
            mode: ToolMode::Brush,
        }
    }
}

impl ToolState {
    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn brush_size(&self) -> i32 {
        self.brush_size
    }

    pub fn brush_shape(&self) -> BrushShape {
        self.brush_shape
    }

    pub fn mode(&self) -> ToolMode {
        self.mode
    }

    pub fn set_color(&mut self, color: Color32) {
        self.color = color;
    }

    pub fn set_brush_size(&mut self, size: i32) -> Result<(), InvalidBrushConfig> {
        if size <= 0 {
            log::debug!("ignoring brush size {size}");
            return Err(InvalidBrushConfig::NonPositiveSize(size));
        }
        self.brush_size = size;
        Ok(())
    }

    pub fn set_brush_shape(&mut self, shape: BrushShape) {
        self.brush_shape = shape;
    }

    pub fn set_mode(&mut self, mode: ToolMode) {
        self.mode = mode;
    }
}
