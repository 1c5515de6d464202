//! The editor's interaction state machine.
//!
//! A press with the active tool leaves `Idle`; release (or the UI answering a
//! request) returns to it. Perspective collection spans several presses and
//! stays active until the fourth point.
//!
//! ```text
//!          press                      release
//! Idle ──────────► DrawingStroke ──────────────► Idle
//!      ──────────► DraggingShape ──────────────►
//!      ──────────► DraggingText  ──────────────►
//!      ──────────► PlacingText   ── submit ────►
//!      ──────────► SamplingColor ── sampled ───►
//!      ──────────► CollectingPerspective ── 4th point ──► Idle
//! ```
use egui::Pos2;

use crate::id_generator::EntityId;
use crate::renderer::RenderHandle;
use crate::shape::ShapeKind;
use crate::stroke::StrokeBuilder;

#[derive(Debug, Clone, Default)]
pub enum EditorState {
    /// No active operation
    #[default]
    Idle,
    /// Freehand stroke in progress
    DrawingStroke { stroke: StrokeBuilder },
    /// Shape drag in progress, with the preview currently on the surface
    DraggingShape {
        kind: ShapeKind,
        start: Pos2,
        preview: Option<RenderHandle>,
    },
    /// Waiting for the UI to supply text for the given anchor
    PlacingText { at: Pos2 },
    /// Moving a text item
    DraggingText { id: EntityId, last: Pos2 },
    /// Waiting for the UI to sample a color
    SamplingColor { at: Pos2 },
    /// Perspective points collected so far, with their marker handles
    CollectingPerspective {
        points: Vec<Pos2>,
        markers: Vec<RenderHandle>,
    },
}

impl EditorState {
    pub fn name(&self) -> &'static str {
        match self {
            EditorState::Idle => "Idle",
            EditorState::DrawingStroke { .. } => "DrawingStroke",
            EditorState::DraggingShape { .. } => "DraggingShape",
            EditorState::PlacingText { .. } => "PlacingText",
            EditorState::DraggingText { .. } => "DraggingText",
            EditorState::SamplingColor { .. } => "SamplingColor",
            EditorState::CollectingPerspective { .. } => "CollectingPerspective",
        }
    }

    /// Returns true if the editor is currently in an idle state
    pub fn is_idle(&self) -> bool {
        matches!(self, EditorState::Idle)
    }

    /// Returns true while a pointer drag owns the state
    pub fn is_dragging(&self) -> bool {
        matches!(
            self,
            EditorState::DrawingStroke { .. }
                | EditorState::DraggingShape { .. }
                | EditorState::DraggingText { .. }
        )
    }

    /// Returns true while the editor waits on the UI
    pub fn is_awaiting_ui(&self) -> bool {
        matches!(
            self,
            EditorState::PlacingText { .. } | EditorState::SamplingColor { .. }
        )
    }
}
