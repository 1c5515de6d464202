use egui::Pos2;
use std::sync::Arc;

use crate::command::{
    Applied, Command, CommandContext, CommandHistory, HistoryResult, RestoreOptions,
};
use crate::geometry::{Matrix2, rotation_matrix, scale_matrix};
use crate::id_generator::{EntityId, IdGenerator};
use crate::renderer::{RenderHandle, RenderSurface, Renderer};
use crate::shape::{Shape, ShapeTable};
use crate::stroke::StrokeRef;
use crate::text::TextItem;

/// One sketching session: live strokes, the shape registry, text items and
/// the undo/redo history. All mutation goes through this object.
#[derive(Debug, Clone)]
pub struct Document {
    strokes: Vec<StrokeRef>,
    shapes: ShapeTable,
    texts: Vec<TextItem>,
    history: CommandHistory,
    ids: IdGenerator,
    last_rotation: Option<Matrix2>,
    last_pivot: Pos2,
    rotate_restored_rectangles: bool,
}

impl Default for Document {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Document {
    pub fn new(rotate_restored_rectangles: bool) -> Self {
        Self {
            strokes: Vec::new(),
            shapes: ShapeTable::new(),
            texts: Vec::new(),
            history: CommandHistory::new(),
            ids: IdGenerator::new(),
            last_rotation: None,
            last_pivot: Pos2::ZERO,
            rotate_restored_rectangles,
        }
    }

    pub fn next_id(&mut self) -> EntityId {
        self.ids.generate()
    }

    pub fn strokes(&self) -> &[StrokeRef] {
        &self.strokes
    }

    pub fn shapes(&self) -> &ShapeTable {
        &self.shapes
    }

    pub fn texts(&self) -> &[TextItem] {
        &self.texts
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    /// Live shapes in the order they were recorded.
    pub fn live_shapes(&self) -> Vec<&Shape> {
        self.live_shape_ids()
            .into_iter()
            .filter_map(|id| self.shapes.get(id).map(|r| &r.shape))
            .collect()
    }

    fn live_shape_ids(&self) -> Vec<EntityId> {
        self.history
            .undo_stack()
            .iter()
            .filter_map(|c| match c {
                Command::AddShape(id) if self.shapes.is_live(*id) => Some(*id),
                _ => None,
            })
            .collect()
    }

    /// Finalizes a stroke into the live collection and history.
    pub fn record_stroke(&mut self, stroke: StrokeRef) {
        log::info!(
            "Stroke {} finished with {} points",
            stroke.id(),
            stroke.points().len()
        );
        self.strokes.push(stroke.clone());
        self.history.record(Command::AddStroke(stroke));
    }

    /// Finalizes a shape already rendered under `handle`.
    pub fn record_shape(&mut self, shape: Shape, handle: Option<RenderHandle>) {
        log::info!("{} {} saved at {:?}", shape.kind.name(), shape.id, shape.coords);
        let id = shape.id;
        self.shapes.insert(shape, handle);
        self.history.record(Command::AddShape(id));
    }

    pub fn add_text(&mut self, text: TextItem) {
        log::info!("Text {} placed at {:?}", text.id, text.pos);
        self.texts.push(text);
    }

    pub fn text_mut(&mut self, id: EntityId) -> Option<&mut TextItem> {
        self.texts.iter_mut().find(|t| t.id == id)
    }

    fn restore_options(&self) -> RestoreOptions {
        RestoreOptions {
            pivot: self.last_pivot,
            last_rotation: self.last_rotation,
            rotate_rectangles: self.rotate_restored_rectangles,
        }
    }

    /// Undoes the last action. The caller redraws afterwards.
    pub fn undo(&mut self, surface: &mut dyn RenderSurface) -> HistoryResult<Applied> {
        let restore = self.restore_options();
        let mut ctx = CommandContext {
            strokes: &mut self.strokes,
            shapes: &mut self.shapes,
            surface,
            restore,
        };
        self.history.undo(&mut ctx)
    }

    /// Redoes the last undone action. The caller redraws afterwards.
    pub fn redo(&mut self, surface: &mut dyn RenderSurface) -> HistoryResult<Applied> {
        let restore = self.restore_options();
        let mut ctx = CommandContext {
            strokes: &mut self.strokes,
            shapes: &mut self.shapes,
            surface,
            restore,
        };
        self.history.redo(&mut ctx)
    }

    /// Maps every live stroke and shape through `matrix` about `pivot`.
    ///
    /// Strokes are replaced by new instances; shapes have their stored
    /// coordinates overwritten. Handles are reassigned by the next redraw.
    pub fn transform_all(&mut self, matrix: &Matrix2, pivot: Pos2) {
        self.strokes = self
            .strokes
            .iter()
            .map(|s| Arc::new(s.transformed(matrix, pivot)))
            .collect();

        for id in self.live_shape_ids() {
            if let Some(record) = self.shapes.get_mut(id) {
                record.shape.transform(matrix, pivot);
            }
        }
    }

    pub fn rotate_all(
        &mut self,
        angle_degrees: f32,
        pivot: Pos2,
        renderer: &mut Renderer,
        surface: &mut dyn RenderSurface,
    ) {
        log::info!("Rotating canvas by {}° about {:?}", angle_degrees, pivot);
        let matrix = rotation_matrix(angle_degrees);
        self.transform_all(&matrix, pivot);
        self.last_rotation = Some(matrix);
        self.last_pivot = pivot;
        self.redraw(renderer, surface);
    }

    pub fn scale_all(
        &mut self,
        factor_x: f32,
        factor_y: f32,
        pivot: Pos2,
        renderer: &mut Renderer,
        surface: &mut dyn RenderSurface,
    ) {
        log::info!("Scaling canvas by ({}, {}) about {:?}", factor_x, factor_y, pivot);
        self.transform_all(&scale_matrix(factor_x, factor_y), pivot);
        self.redraw(renderer, surface);
    }

    /// Drops every live stroke, shape and text. History is kept, so this
    /// cannot be undone.
    pub fn clear(&mut self, surface: &mut dyn RenderSurface) {
        log::info!("Clearing canvas");
        self.strokes.clear();
        self.shapes.clear_live();
        self.texts.clear();
        surface.clear();
    }

    /// Clears the surface and re-emits strokes, then shapes, then text.
    pub fn redraw(&mut self, renderer: &mut Renderer, surface: &mut dyn RenderSurface) {
        surface.clear();

        for stroke in &self.strokes {
            renderer.draw_stroke(surface, stroke);
        }

        for id in self.live_shape_ids() {
            if let Some(record) = self.shapes.get_mut(id) {
                record.handle = Some(renderer.draw_shape(surface, &record.shape));
            }
        }

        for text in &mut self.texts {
            text.handle = Some(renderer.draw_text(surface, text));
        }
    }
}
