use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::config::SketchConfig;
use crate::shape::ShapeKind;
use crate::stroke::BrushStyle;

/// The active canvas tool. Decides what a pointer press starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tool {
    #[default]
    Draw,
    Eyedrop,
    Text,
    SelectText,
    Rectangle,
    Circle,
    Line,
    Perspective,
}

impl Tool {
    /// Tools shown on the main toolbar.
    pub const TOOLBAR: [Tool; 5] = [
        Tool::Draw,
        Tool::Eyedrop,
        Tool::Text,
        Tool::SelectText,
        Tool::Perspective,
    ];

    /// Tools shown on the shapes panel.
    pub const SHAPES: [Tool; 3] = [Tool::Rectangle, Tool::Circle, Tool::Line];

    pub fn name(&self) -> &'static str {
        match self {
            Tool::Draw => "Draw",
            Tool::Eyedrop => "Eyedropper",
            Tool::Text => "Text",
            Tool::SelectText => "Select Text",
            Tool::Rectangle => "Rectangle",
            Tool::Circle => "Circle",
            Tool::Line => "Line",
            Tool::Perspective => "Perspective",
        }
    }

    /// The shape a drag with this tool creates, if any.
    pub fn shape_kind(&self) -> Option<ShapeKind> {
        match self {
            Tool::Rectangle => Some(ShapeKind::Rectangle),
            Tool::Circle => Some(ShapeKind::Circle),
            Tool::Line => Some(ShapeKind::Line),
            _ => None,
        }
    }
}

/// Current tool and drawing parameters. Persisted across sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    pub tool: Tool,
    pub color: Color32,
    pub thickness: f32,
    pub brush: BrushStyle,
    pub opacity: f32,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self::from_config(&SketchConfig::default())
    }
}

impl ToolSettings {
    pub fn from_config(config: &SketchConfig) -> Self {
        Self {
            tool: Tool::Draw,
            color: config.default_color(),
            thickness: config.clamp_thickness(config.default_thickness),
            brush: BrushStyle::Round,
            opacity: config.default_opacity,
        }
    }
}
