use egui::{Color32, Pos2};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::geometry::{Matrix2, apply_transform_about};
use crate::id_generator::EntityId;

/// Rendering algorithm used for a stroke's segments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BrushStyle {
    #[default]
    Round,
    Watercolor,
    Charcoal,
    Pencil,
    Marker,
}

impl BrushStyle {
    pub const ALL: [BrushStyle; 5] = [
        BrushStyle::Round,
        BrushStyle::Watercolor,
        BrushStyle::Charcoal,
        BrushStyle::Pencil,
        BrushStyle::Marker,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            BrushStyle::Round => "round",
            BrushStyle::Watercolor => "watercolor",
            BrushStyle::Charcoal => "charcoal",
            BrushStyle::Pencil => "pencil",
            BrushStyle::Marker => "marker",
        }
    }
}

// Immutable stroke for sharing
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    id: EntityId,
    points: Vec<Pos2>,
    color: Color32,
    thickness: f32,
    opacity: f32,
    brush: BrushStyle,
}

// Reference-counted stroke shared between the live collection and history
pub type StrokeRef = Arc<Stroke>;

impl Stroke {
    pub fn new(
        id: EntityId,
        points: Vec<Pos2>,
        color: Color32,
        thickness: f32,
        opacity: f32,
        brush: BrushStyle,
    ) -> Self {
        Self {
            id,
            points,
            color,
            thickness,
            opacity: opacity.clamp(0.0, 1.0),
            brush,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn thickness(&self) -> f32 {
        self.thickness
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn brush(&self) -> BrushStyle {
        self.brush
    }

    /// A new stroke with the same identity and attributes and mapped points.
    /// `self` is left untouched, so copies held by history stay valid.
    pub fn transformed(&self, matrix: &Matrix2, pivot: Pos2) -> Stroke {
        Stroke {
            points: apply_transform_about(matrix, pivot, &self.points),
            ..self.clone()
        }
    }
}

/// Stroke being drawn. Points are only ever appended.
#[derive(Debug, Clone)]
pub struct StrokeBuilder {
    id: EntityId,
    points: Vec<Pos2>,
    color: Color32,
    thickness: f32,
    opacity: f32,
    brush: BrushStyle,
}

impl StrokeBuilder {
    pub fn new(
        id: EntityId,
        color: Color32,
        thickness: f32,
        opacity: f32,
        brush: BrushStyle,
    ) -> Self {
        Self {
            id,
            points: Vec::new(),
            color,
            thickness,
            opacity,
            brush,
        }
    }

    pub fn add_point(&mut self, point: Pos2) {
        self.points.push(point);
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn last_point(&self) -> Option<Pos2> {
        self.points.last().copied()
    }

    /// Style-only view of the stroke, for rendering segments while drawing.
    pub fn style(&self) -> Stroke {
        Stroke::new(self.id, Vec::new(), self.color, self.thickness, self.opacity, self.brush)
    }

    pub fn finish(self) -> StrokeRef {
        Arc::new(Stroke::new(
            self.id,
            self.points,
            self.color,
            self.thickness,
            self.opacity,
            self.brush,
        ))
    }
}
