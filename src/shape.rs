use egui::{Color32, Pos2, Rect};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::geometry::Matrix2;
use crate::id_generator::EntityId;
use crate::renderer::{RenderHandle, RenderPrimitive, shape_primitive};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Rectangle,
    Circle,
    Line,
}

impl ShapeKind {
    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Circle => "circle",
            ShapeKind::Line => "line",
        }
    }
}

/// A parametric shape.
///
/// `coords` are two points: opposite corners of the bounding box for
/// rectangles and circles, the two endpoints for lines.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub id: EntityId,
    pub kind: ShapeKind,
    pub coords: [Pos2; 2],
    pub color: Color32,
    pub thickness: f32,
}

impl Shape {
    pub fn new(
        id: EntityId,
        kind: ShapeKind,
        start: Pos2,
        end: Pos2,
        color: Color32,
        thickness: f32,
    ) -> Self {
        Self {
            id,
            kind,
            coords: [start, end],
            color,
            thickness,
        }
    }

    /// Normalized bounding box spanned by the two stored points.
    pub fn bbox(&self) -> Rect {
        Rect::from_two_pos(self.coords[0], self.coords[1])
    }

    /// The four corners of the stored box: top-left, top-right, bottom-right,
    /// bottom-left in terms of the raw coordinates.
    pub fn corners(&self) -> [Pos2; 4] {
        let [a, b] = self.coords;
        [a, Pos2::new(b.x, a.y), b, Pos2::new(a.x, b.y)]
    }

    pub fn primitive(&self) -> RenderPrimitive {
        shape_primitive(self.kind, self.coords[0], self.coords[1], self.color, self.thickness)
    }

    /// Overwrites both coordinate pairs with their pivot-relative images.
    pub fn transform(&mut self, matrix: &Matrix2, pivot: Pos2) {
        for p in &mut self.coords {
            *p = matrix.apply_about(pivot, *p);
        }
    }
}

/// A shape in the registry together with its current render handle.
#[derive(Debug, Clone)]
pub struct ShapeRecord {
    pub shape: Shape,
    pub handle: Option<RenderHandle>,
    pub live: bool,
}

/// Indirection table from stable shape id to shape data and render handle.
///
/// Entries are never removed: undone shapes stay here (not live) so that redo
/// can bring them back.
#[derive(Debug, Default, Clone)]
pub struct ShapeTable {
    records: HashMap<EntityId, ShapeRecord>,
}

impl ShapeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, shape: Shape, handle: Option<RenderHandle>) {
        let id = shape.id;
        self.records.insert(
            id,
            ShapeRecord {
                shape,
                handle,
                live: true,
            },
        );
    }

    pub fn get(&self, id: EntityId) -> Option<&ShapeRecord> {
        self.records.get(&id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut ShapeRecord> {
        self.records.get_mut(&id)
    }

    pub fn is_live(&self, id: EntityId) -> bool {
        self.records.get(&id).is_some_and(|r| r.live)
    }

    pub fn live_count(&self) -> usize {
        self.records.values().filter(|r| r.live).count()
    }

    /// Marks every shape as not live and forgets its handle.
    pub fn clear_live(&mut self) {
        for record in self.records.values_mut() {
            record.live = false;
            record.handle = None;
        }
    }
}
