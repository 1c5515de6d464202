use egui::{Color32, Pos2, Vec2, pos2, vec2};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::color;

/// Errors that can occur while loading a [`SketchConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Canvas and tool defaults. Every field falls back to its default when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SketchConfig {
    pub canvas_width: f32,
    pub canvas_height: f32,
    /// Angle applied by the rotate button, degrees counter-clockwise.
    pub rotate_step_degrees: f32,
    pub zoom_in_factor: f32,
    /// Roughly 1 / zoom_in_factor; in/out pairs drift slightly.
    pub zoom_out_factor: f32,
    /// `#rrggbb`
    pub default_color: String,
    pub default_thickness: f32,
    pub min_thickness: f32,
    pub max_thickness: f32,
    pub default_opacity: f32,
    /// Fixed seed for brush jitter. `None` seeds from the OS.
    pub jitter_seed: Option<u64>,
    /// Redo draws rectangles as corners passed through the last rotation.
    pub rotate_restored_rectangles: bool,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            canvas_width: 800.0,
            canvas_height: 600.0,
            rotate_step_degrees: 90.0,
            zoom_in_factor: 1.5,
            zoom_out_factor: 0.67,
            default_color: "#000000".to_string(),
            default_thickness: 2.0,
            min_thickness: 1.0,
            max_thickness: 20.0,
            default_opacity: 1.0,
            jitter_seed: None,
            rotate_restored_rectangles: true,
        }
    }
}

impl SketchConfig {
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if !(self.canvas_width > 0.0 && self.canvas_height > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "canvas size must be positive, got {}x{}",
                self.canvas_width, self.canvas_height
            )));
        }
        if !(self.zoom_in_factor > 0.0 && self.zoom_out_factor > 0.0) {
            return Err(ConfigError::Invalid("zoom factors must be positive".to_string()));
        }
        if !(self.min_thickness > 0.0 && self.min_thickness <= self.max_thickness) {
            return Err(ConfigError::Invalid(format!(
                "thickness range {}..={} is empty or not positive",
                self.min_thickness, self.max_thickness
            )));
        }
        if !(0.0..=1.0).contains(&self.default_opacity) {
            return Err(ConfigError::Invalid(format!(
                "default opacity {} outside 0..=1",
                self.default_opacity
            )));
        }
        Ok(())
    }

    pub fn canvas_size(&self) -> Vec2 {
        vec2(self.canvas_width, self.canvas_height)
    }

    /// Center of the canvas, the pivot for rotate and zoom.
    pub fn pivot(&self) -> Pos2 {
        pos2(self.canvas_width / 2.0, self.canvas_height / 2.0)
    }

    pub fn default_color(&self) -> Color32 {
        color::parse_or(&self.default_color, color::FALLBACK_COLOR)
    }

    pub fn clamp_thickness(&self, thickness: f32) -> f32 {
        thickness.clamp(self.min_thickness, self.max_thickness)
    }
}
