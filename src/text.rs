use egui::{Color32, Pos2, Vec2};

use crate::id_generator::EntityId;
use crate::renderer::RenderHandle;

pub const DEFAULT_FONT_SIZE: f32 = 12.0;

/// How far from a text anchor a press still selects it.
pub const TEXT_PICK_RADIUS: f32 = 20.0;

/// A piece of text placed on the canvas. Not part of undo history.
#[derive(Debug, Clone, PartialEq)]
pub struct TextItem {
    pub id: EntityId,
    pub pos: Pos2,
    pub text: String,
    pub color: Color32,
    pub font_size: f32,
    pub handle: Option<RenderHandle>,
}

impl TextItem {
    pub fn new(id: EntityId, pos: Pos2, text: String, color: Color32) -> Self {
        Self {
            id,
            pos,
            text,
            color,
            font_size: DEFAULT_FONT_SIZE,
            handle: None,
        }
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.pos += delta;
    }
}

/// Normalizes modal input: `None`, empty and whitespace-only all mean "no text".
pub fn accept_input(input: Option<String>) -> Option<String> {
    input.filter(|s| !s.trim().is_empty())
}

/// The item whose anchor is closest to `pos`, within [`TEXT_PICK_RADIUS`].
pub fn closest_text(items: &[TextItem], pos: Pos2) -> Option<EntityId> {
    items
        .iter()
        .map(|t| (t.id, t.pos.distance(pos)))
        .filter(|(_, d)| *d <= TEXT_PICK_RADIUS)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(id, _)| id)
}
