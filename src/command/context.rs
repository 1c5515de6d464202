use egui::Pos2;

use crate::geometry::Matrix2;
use crate::renderer::RenderSurface;
use crate::shape::ShapeTable;
use crate::stroke::StrokeRef;

/// How shapes are re-rendered when redo brings them back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RestoreOptions {
    /// Pivot of the most recent rotation.
    pub pivot: Pos2,
    /// Matrix of the most recent rotate command, if any.
    pub last_rotation: Option<Matrix2>,
    /// Restore rectangles as four corners passed through `last_rotation`.
    pub rotate_rectangles: bool,
}

impl Default for RestoreOptions {
    fn default() -> Self {
        Self {
            pivot: Pos2::ZERO,
            last_rotation: None,
            rotate_rectangles: true,
        }
    }
}

/// Mutable view of the live canvas that undo/redo act upon.
pub struct CommandContext<'a> {
    /// Live strokes, in drawing order
    pub strokes: &'a mut Vec<StrokeRef>,
    /// Shape registry with current render handles
    pub shapes: &'a mut ShapeTable,
    /// Surface holding the rendered primitives
    pub surface: &'a mut dyn RenderSurface,
    pub restore: RestoreOptions,
}
