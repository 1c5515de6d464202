use super::{Command, CommandContext, HistoryError, HistoryResult};

/// One undo or redo step and whether it changed the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct Applied {
    pub command: Command,
    /// False when the entity had already been cleared off the canvas
    pub changed: bool,
}

#[derive(Debug, Clone)]
struct RedoEntry {
    command: Command,
    /// Whether undo actually took the entity off the canvas
    restorable: bool,
}

/// Manages the history of recorded actions for undo/redo functionality
#[derive(Debug, Default, Clone)]
pub struct CommandHistory {
    /// Stack of commands that can be undone
    undo_stack: Vec<Command>,
    /// Stack of commands that can be redone
    redo_stack: Vec<RedoEntry>,
}

impl CommandHistory {
    /// Creates a new empty command history
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a new action. This is the only place the redo stack is cleared.
    pub fn record(&mut self, command: Command) {
        log::debug!("Recording {}", command);
        self.undo_stack.push(command);
        self.redo_stack.clear();
    }

    /// Undo the last recorded command. The caller redraws afterwards.
    pub fn undo(&mut self, ctx: &mut CommandContext<'_>) -> HistoryResult<Applied> {
        let mut command = self.undo_stack.pop().ok_or(HistoryError::NothingToUndo)?;
        let changed = command.unapply(ctx);
        self.redo_stack.push(RedoEntry {
            command: command.clone(),
            restorable: changed,
        });
        Ok(Applied { command, changed })
    }

    /// Redo the last undone command. The caller redraws afterwards.
    ///
    /// An entry whose entity was already gone when it was undone moves back
    /// to the undo stack without touching the canvas.
    pub fn redo(&mut self, ctx: &mut CommandContext<'_>) -> HistoryResult<Applied> {
        let entry = self.redo_stack.pop().ok_or(HistoryError::NothingToRedo)?;
        if entry.restorable {
            entry.command.reapply(ctx);
        }
        self.undo_stack.push(entry.command.clone());
        Ok(Applied {
            command: entry.command,
            changed: entry.restorable,
        })
    }

    /// Returns true if there are commands that can be undone
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Returns true if there are commands that can be redone
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_stack(&self) -> &[Command] {
        &self.undo_stack
    }

    /// Redoable commands, oldest first.
    pub fn redo_stack(&self) -> Vec<&Command> {
        self.redo_stack.iter().map(|e| &e.command).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::RestoreOptions;
    use crate::geometry::rotation_matrix;
    use crate::id_generator::EntityId;
    use crate::renderer::{DisplayList, RenderPrimitive, RenderSurface};
    use crate::shape::{Shape, ShapeKind, ShapeTable};
    use crate::stroke::{BrushStyle, Stroke, StrokeRef};
    use egui::{Color32, pos2};
    use std::sync::Arc;

    struct Canvas {
        strokes: Vec<StrokeRef>,
        shapes: ShapeTable,
        surface: DisplayList,
        restore: RestoreOptions,
    }

    impl Canvas {
        fn new() -> Self {
            Self {
                strokes: Vec::new(),
                shapes: ShapeTable::new(),
                surface: DisplayList::new(),
                restore: RestoreOptions::default(),
            }
        }

        fn ctx(&mut self) -> CommandContext<'_> {
            CommandContext {
                strokes: &mut self.strokes,
                shapes: &mut self.shapes,
                surface: &mut self.surface,
                restore: self.restore,
            }
        }

        fn live_ids(&self) -> Vec<u64> {
            self.strokes.iter().map(|s| s.id().0).collect()
        }
    }

    fn stroke(id: u64) -> StrokeRef {
        Arc::new(Stroke::new(
            EntityId(id),
            vec![pos2(0.0, 0.0), pos2(id as f32, 1.0)],
            Color32::BLACK,
            2.0,
            1.0,
            BrushStyle::Round,
        ))
    }

    fn draw(history: &mut CommandHistory, canvas: &mut Canvas, id: u64) {
        let s = stroke(id);
        canvas.strokes.push(s.clone());
        history.record(Command::AddStroke(s));
    }

    #[test]
    fn test_empty_history_is_reported() {
        let mut history = CommandHistory::new();
        let mut canvas = Canvas::new();
        assert_eq!(history.undo(&mut canvas.ctx()), Err(HistoryError::NothingToUndo));
        assert_eq!(history.redo(&mut canvas.ctx()), Err(HistoryError::NothingToRedo));
    }

    #[test]
    fn test_undo_redo_are_inverse_for_strokes() {
        let mut history = CommandHistory::new();
        let mut canvas = Canvas::new();
        draw(&mut history, &mut canvas, 1);
        let before = canvas.live_ids();

        draw(&mut history, &mut canvas, 2);
        let after = canvas.live_ids();

        history.undo(&mut canvas.ctx()).unwrap();
        assert_eq!(canvas.live_ids(), before);
        history.redo(&mut canvas.ctx()).unwrap();
        assert_eq!(canvas.live_ids(), after);
    }

    #[test]
    fn test_record_clears_redo() {
        let mut history = CommandHistory::new();
        let mut canvas = Canvas::new();
        draw(&mut history, &mut canvas, 1);
        draw(&mut history, &mut canvas, 2);
        history.undo(&mut canvas.ctx()).unwrap();
        assert!(history.can_redo());

        draw(&mut history, &mut canvas, 3);
        assert!(!history.can_redo());
        assert_eq!(history.redo(&mut canvas.ctx()), Err(HistoryError::NothingToRedo));
        assert_eq!(canvas.live_ids(), vec![1, 3]);
    }

    #[test]
    fn test_undo_keeps_transformed_copy_for_redo() {
        let mut history = CommandHistory::new();
        let mut canvas = Canvas::new();
        draw(&mut history, &mut canvas, 1);

        // a transform swaps the live instance for a new one with the same id
        let moved = Arc::new(canvas.strokes[0].transformed(&rotation_matrix(90.0), pos2(0.0, 0.0)));
        canvas.strokes[0] = moved.clone();

        history.undo(&mut canvas.ctx()).unwrap();
        assert!(canvas.strokes.is_empty());
        history.redo(&mut canvas.ctx()).unwrap();
        assert_eq!(canvas.strokes, vec![moved]);
    }

    #[test]
    fn test_shape_undo_deletes_handle_and_redo_assigns_new_one() {
        let mut history = CommandHistory::new();
        let mut canvas = Canvas::new();
        canvas.restore.rotate_rectangles = false;
        let shape = Shape::new(
            EntityId(5),
            ShapeKind::Circle,
            pos2(0.0, 0.0),
            pos2(10.0, 10.0),
            Color32::RED,
            2.0,
        );
        let handle = canvas.surface.draw(shape.primitive());
        canvas.shapes.insert(shape, Some(handle));
        history.record(Command::AddShape(EntityId(5)));

        history.undo(&mut canvas.ctx()).unwrap();
        assert!(canvas.surface.get(handle).is_none());
        assert!(!canvas.shapes.is_live(EntityId(5)));

        history.redo(&mut canvas.ctx()).unwrap();
        let record = canvas.shapes.get(EntityId(5)).unwrap();
        let new_handle = record.handle.unwrap();
        assert_ne!(new_handle, handle);
        assert!(record.live);
        assert!(matches!(canvas.surface.get(new_handle), Some(RenderPrimitive::Oval { .. })));
        // entry was moved back, not duplicated
        assert_eq!(history.undo_stack().len(), 1);
    }

    #[test]
    fn test_rectangle_redo_rotates_corners() {
        let mut history = CommandHistory::new();
        let mut canvas = Canvas::new();
        canvas.restore = RestoreOptions {
            pivot: pos2(0.0, 0.0),
            last_rotation: Some(rotation_matrix(90.0)),
            rotate_rectangles: true,
        };
        let shape = Shape::new(
            EntityId(1),
            ShapeKind::Rectangle,
            pos2(10.0, 0.0),
            pos2(20.0, 5.0),
            Color32::RED,
            2.0,
        );
        canvas.shapes.insert(shape, None);
        history.record(Command::AddShape(EntityId(1)));
        history.undo(&mut canvas.ctx()).unwrap();
        history.redo(&mut canvas.ctx()).unwrap();

        let handle = canvas.shapes.get(EntityId(1)).unwrap().handle.unwrap();
        let Some(RenderPrimitive::Polygon { points, .. }) = canvas.surface.get(handle) else {
            panic!("expected polygon");
        };
        assert_eq!(points.len(), 4);
        // (10, 0) rotated a quarter turn about the origin
        assert!((points[0] - pos2(0.0, 10.0)).length() < 1e-4);
        // stored geometry is untouched
        assert_eq!(canvas.shapes.get(EntityId(1)).unwrap().shape.coords[0], pos2(10.0, 0.0));
    }

    #[test]
    fn test_line_redo_uses_raw_coords() {
        let mut history = CommandHistory::new();
        let mut canvas = Canvas::new();
        canvas.restore.last_rotation = Some(rotation_matrix(90.0));
        let shape = Shape::new(
            EntityId(1),
            ShapeKind::Line,
            pos2(10.0, 0.0),
            pos2(20.0, 5.0),
            Color32::RED,
            2.0,
        );
        canvas.shapes.insert(shape.clone(), None);
        history.record(Command::AddShape(EntityId(1)));
        history.undo(&mut canvas.ctx()).unwrap();
        history.redo(&mut canvas.ctx()).unwrap();

        let handle = canvas.shapes.get(EntityId(1)).unwrap().handle.unwrap();
        assert_eq!(canvas.surface.get(handle), Some(&shape.primitive()));
    }

    #[test]
    fn test_redo_skips_entries_cleared_before_undo() {
        let mut history = CommandHistory::new();
        let mut canvas = Canvas::new();
        draw(&mut history, &mut canvas, 1);
        let shape = Shape::new(
            EntityId(2),
            ShapeKind::Circle,
            pos2(0.0, 0.0),
            pos2(10.0, 10.0),
            Color32::RED,
            2.0,
        );
        canvas.shapes.insert(shape, None);
        history.record(Command::AddShape(EntityId(2)));

        // clear drops everything live but keeps the history
        canvas.strokes.clear();
        canvas.shapes.clear_live();

        let undone = history.undo(&mut canvas.ctx()).unwrap();
        assert!(!undone.changed);
        let undone = history.undo(&mut canvas.ctx()).unwrap();
        assert!(!undone.changed);

        let redone = history.redo(&mut canvas.ctx()).unwrap();
        assert_eq!(redone.command.entity_id(), EntityId(1));
        assert!(!redone.changed);
        history.redo(&mut canvas.ctx()).unwrap();

        assert!(canvas.strokes.is_empty());
        assert!(!canvas.shapes.is_live(EntityId(2)));
        assert!(canvas.surface.is_empty());
        assert_eq!(history.undo_stack().len(), 2);
        assert!(!history.can_redo());
    }
}
