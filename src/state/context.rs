//! The editor context: owns the document session, the interaction state and
//! the render surface, and turns pointer events and button commands into
//! document operations.
//!
//! Every entry point returns an [`EditorResponse`] listing what the UI has to
//! do next: repaint, prompt for text, sample a color, run a warp, or show a
//! status message. The context itself never blocks on the UI.
use egui::{Color32, Pos2, Vec2};

use super::EditorState;
use crate::command::{Applied, HistoryResult};
use crate::config::SketchConfig;
use crate::document::Document;
use crate::error::{CaptureError, TransitionError};
use crate::geometry::{PerspectiveTransform, WarpResult};
use crate::id_generator::EntityId;
use crate::input::InputEvent;
use crate::renderer::{
    DisplayList, RenderHandle, RenderPrimitive, RenderSurface, Renderer, shape_primitive,
};
use crate::shape::{Shape, ShapeKind};
use crate::stroke::{BrushStyle, StrokeBuilder};
use crate::text::{self, TextItem};
use crate::tools::{Tool, ToolSettings};

/// Number of points that define a perspective quad.
pub const PERSPECTIVE_POINTS: usize = 4;
pub const PERSPECTIVE_MARKER_RADIUS: f32 = 4.0;

/// Something the UI has to act on.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// The surface changed and must be repainted
    Redraw,
    /// Prompt for a string, then call [`EditorContext::submit_text`]
    RequestText { at: Pos2 },
    /// Read the displayed color, then call [`EditorContext::apply_sampled_color`]
    SampleColor { at: Pos2 },
    /// Warp the displayed canvas, then call [`EditorContext::report_warp_result`]
    Warp(PerspectiveTransform),
    /// Show a message in the status line
    Status(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditorResponse {
    pub effects: Vec<Effect>,
}

impl EditorResponse {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn redraw() -> Self {
        Self {
            effects: vec![Effect::Redraw],
        }
    }

    pub fn status(message: impl Into<String>) -> Self {
        Self {
            effects: vec![Effect::Status(message.into())],
        }
    }

    pub fn with(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn needs_redraw(&self) -> bool {
        self.effects.contains(&Effect::Redraw)
    }

    /// The last status message, if any.
    pub fn status_message(&self) -> Option<&str> {
        self.effects.iter().rev().find_map(|e| match e {
            Effect::Status(msg) => Some(msg.as_str()),
            _ => None,
        })
    }
}

/// The main context for the sketch editor.
#[derive(Debug)]
pub struct EditorContext<S: RenderSurface = DisplayList> {
    document: Document,
    state: EditorState,
    settings: ToolSettings,
    renderer: Renderer,
    surface: S,
    config: SketchConfig,
}

impl<S: RenderSurface + Default> Default for EditorContext<S> {
    fn default() -> Self {
        Self::new(SketchConfig::default(), S::default())
    }
}

impl<S: RenderSurface> EditorContext<S> {
    pub fn new(config: SketchConfig, surface: S) -> Self {
        let settings = ToolSettings::from_config(&config);
        Self::with_settings(config, settings, surface)
    }

    /// Starts a session with previously persisted tool settings.
    pub fn with_settings(config: SketchConfig, mut settings: ToolSettings, surface: S) -> Self {
        settings.thickness = config.clamp_thickness(settings.thickness);
        settings.opacity = settings.opacity.clamp(0.0, 1.0);
        Self {
            document: Document::new(config.rotate_restored_rectangles),
            state: EditorState::Idle,
            settings,
            renderer: Renderer::new(config.jitter_seed),
            surface,
            config,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn settings(&self) -> &ToolSettings {
        &self.settings
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn config(&self) -> &SketchConfig {
        &self.config
    }

    /// Switches tools, abandoning any half-finished interaction.
    pub fn set_tool(&mut self, tool: Tool) -> EditorResponse {
        if self.settings.tool == tool {
            return EditorResponse::none();
        }
        log::info!("Tool changed: {} -> {}", self.settings.tool.name(), tool.name());
        self.settings.tool = tool;

        if self.state.is_idle() {
            return EditorResponse::none();
        }
        log::debug!("Abandoning {} on tool change", self.state.name());
        self.state = EditorState::Idle;
        self.document.redraw(&mut self.renderer, &mut self.surface);
        EditorResponse::redraw()
    }

    pub fn set_color(&mut self, color: Color32) {
        self.settings.color = color;
    }

    pub fn set_thickness(&mut self, thickness: f32) {
        self.settings.thickness = self.config.clamp_thickness(thickness);
    }

    pub fn set_brush(&mut self, brush: BrushStyle) {
        self.settings.brush = brush;
    }

    pub fn set_opacity(&mut self, opacity: f32) {
        self.settings.opacity = opacity.clamp(0.0, 1.0);
    }

    /// Feeds one pointer event through the state machine.
    pub fn handle_event(&mut self, event: InputEvent) -> EditorResponse {
        let state = std::mem::take(&mut self.state);
        let (next, response) = match (state, event) {
            (EditorState::Idle, InputEvent::PointerDown(pos)) => self.on_press(pos),

            (EditorState::DrawingStroke { mut stroke }, InputEvent::PointerMove(pos)) => {
                if let Some(last) = stroke.last_point() {
                    self.renderer.draw_segment(&mut self.surface, &stroke.style(), last, pos);
                }
                stroke.add_point(pos);
                (EditorState::DrawingStroke { stroke }, EditorResponse::redraw())
            }
            (EditorState::DrawingStroke { stroke }, InputEvent::PointerUp(_)) => {
                self.document.record_stroke(stroke.finish());
                (EditorState::Idle, EditorResponse::none())
            }

            (EditorState::DraggingShape { kind, start, preview }, InputEvent::PointerMove(pos)) => {
                if let Some(handle) = preview {
                    self.surface.delete(handle);
                }
                let s = &self.settings;
                let primitive = shape_primitive(kind, start, pos, s.color, s.thickness);
                let preview = Some(self.surface.draw(primitive));
                (EditorState::DraggingShape { kind, start, preview }, EditorResponse::redraw())
            }
            (EditorState::DraggingShape { kind, start, preview }, InputEvent::PointerUp(pos)) => {
                if let Some(handle) = preview {
                    self.surface.delete(handle);
                }
                self.finish_shape(kind, start, pos);
                (EditorState::Idle, EditorResponse::redraw())
            }

            (EditorState::DraggingText { id, last }, InputEvent::PointerMove(pos)) => {
                self.move_text(id, pos - last);
                (EditorState::DraggingText { id, last: pos }, EditorResponse::redraw())
            }
            (EditorState::DraggingText { id, last }, InputEvent::PointerUp(pos)) => {
                self.move_text(id, pos - last);
                log::debug!("Text {} dropped at {:?}", id, pos);
                (EditorState::Idle, EditorResponse::redraw())
            }

            (
                EditorState::CollectingPerspective { points, markers },
                InputEvent::PointerDown(pos),
            ) => self.add_perspective_point(points, markers, pos),

            // everything else leaves the state as it was
            (state, _) => (state, EditorResponse::none()),
        };
        self.state = next;
        response
    }

    fn on_press(&mut self, pos: Pos2) -> (EditorState, EditorResponse) {
        if let Some(kind) = self.settings.tool.shape_kind() {
            return (
                EditorState::DraggingShape {
                    kind,
                    start: pos,
                    preview: None,
                },
                EditorResponse::none(),
            );
        }

        match self.settings.tool {
            Tool::Draw => {
                let id = self.document.next_id();
                let s = &self.settings;
                let mut stroke = StrokeBuilder::new(id, s.color, s.thickness, s.opacity, s.brush);
                stroke.add_point(pos);
                (EditorState::DrawingStroke { stroke }, EditorResponse::none())
            }
            Tool::Text => (
                EditorState::PlacingText { at: pos },
                EditorResponse::none().with(Effect::RequestText { at: pos }),
            ),
            Tool::Eyedrop => (
                EditorState::SamplingColor { at: pos },
                EditorResponse::none().with(Effect::SampleColor { at: pos }),
            ),
            Tool::SelectText => match text::closest_text(self.document.texts(), pos) {
                Some(id) => {
                    log::debug!("Selected text {}", id);
                    (EditorState::DraggingText { id, last: pos }, EditorResponse::none())
                }
                None => (EditorState::Idle, EditorResponse::none()),
            },
            Tool::Perspective => self.add_perspective_point(Vec::new(), Vec::new(), pos),
            Tool::Rectangle | Tool::Circle | Tool::Line => {
                (EditorState::Idle, EditorResponse::none())
            }
        }
    }

    fn finish_shape(&mut self, kind: ShapeKind, start: Pos2, end: Pos2) {
        let id = self.document.next_id();
        let shape = Shape::new(id, kind, start, end, self.settings.color, self.settings.thickness);
        let handle = self.renderer.draw_shape(&mut self.surface, &shape);
        self.document.record_shape(shape, Some(handle));
    }

    fn move_text(&mut self, id: EntityId, delta: Vec2) {
        let Some(item) = self.document.text_mut(id) else {
            log::warn!("Text {} disappeared while dragging", id);
            return;
        };
        item.translate(delta);
        if let Some(handle) = item.handle.take() {
            self.surface.delete(handle);
        }
        let item = item.clone();
        let handle = self.renderer.draw_text(&mut self.surface, &item);
        if let Some(item) = self.document.text_mut(id) {
            item.handle = Some(handle);
        }
    }

    fn add_perspective_point(
        &mut self,
        mut points: Vec<Pos2>,
        mut markers: Vec<RenderHandle>,
        pos: Pos2,
    ) -> (EditorState, EditorResponse) {
        points.push(pos);
        markers.push(self.surface.draw(RenderPrimitive::Marker {
            center: pos,
            radius: PERSPECTIVE_MARKER_RADIUS,
            color: Color32::RED,
        }));
        log::debug!("Perspective point {} at {:?}", points.len(), pos);

        if points.len() < PERSPECTIVE_POINTS {
            return (
                EditorState::CollectingPerspective { points, markers },
                EditorResponse::redraw(),
            );
        }

        for handle in markers {
            self.surface.delete(handle);
        }
        let (width, height) = (self.config.canvas_width, self.config.canvas_height);
        let response = match PerspectiveTransform::to_canvas(&points, width, height) {
            Ok(transform) => {
                log::info!("Perspective transform ready: {:?}", transform.m);
                EditorResponse::redraw().with(Effect::Warp(transform))
            }
            Err(err) => {
                log::warn!("Perspective correction aborted: {}", err);
                EditorResponse::redraw().with(Effect::Status(err.to_string()))
            }
        };
        (EditorState::Idle, response)
    }

    /// Completes a text placement started by a text-tool press.
    pub fn submit_text(
        &mut self,
        input: Option<String>,
    ) -> Result<EditorResponse, TransitionError> {
        let EditorState::PlacingText { at } = self.state else {
            return Err(TransitionError::InvalidStateTransition {
                from: self.state.name(),
                to: "Idle",
            });
        };
        self.state = EditorState::Idle;

        let Some(content) = text::accept_input(input) else {
            log::debug!("Text placement cancelled");
            return Ok(EditorResponse::none());
        };
        let id = self.document.next_id();
        let mut item = TextItem::new(id, at, content, self.settings.color);
        item.handle = Some(self.renderer.draw_text(&mut self.surface, &item));
        self.document.add_text(item);
        Ok(EditorResponse::redraw())
    }

    /// Completes an eyedropper press. The tool returns to drawing either way.
    pub fn apply_sampled_color(
        &mut self,
        sampled: Result<Color32, CaptureError>,
    ) -> Result<EditorResponse, TransitionError> {
        if !matches!(self.state, EditorState::SamplingColor { .. }) {
            return Err(TransitionError::InvalidStateTransition {
                from: self.state.name(),
                to: "Idle",
            });
        }
        self.state = EditorState::Idle;
        self.settings.tool = Tool::Draw;

        match sampled {
            Ok(color) => {
                log::info!("Picked color {}", crate::color::to_hex(color));
                self.settings.color = color;
                Ok(EditorResponse::none())
            }
            Err(err) => {
                log::error!("Color sampling failed: {}", err);
                Ok(EditorResponse::status(format!("Could not pick color: {}", err)))
            }
        }
    }

    /// Reports the outcome of a warp the UI was asked to run.
    pub fn report_warp_result(&mut self, result: WarpResult<()>) -> EditorResponse {
        match result {
            Ok(()) => EditorResponse::status("Perspective corrected"),
            Err(err) => {
                log::error!("Perspective warp failed: {}", err);
                EditorResponse::status(format!("Perspective correction failed: {}", err))
            }
        }
    }

    /// Drops a drag or perspective pick in progress before the surface is
    /// rebuilt. Text and color requests stay pending for the UI.
    fn abandon_interaction(&mut self) -> bool {
        let interrupted = self.state.is_dragging()
            || matches!(self.state, EditorState::CollectingPerspective { .. });
        if interrupted {
            log::debug!("Abandoning {} for a canvas update", self.state.name());
            self.state = EditorState::Idle;
        }
        interrupted
    }

    pub fn undo(&mut self) -> EditorResponse {
        let abandoned = self.abandon_interaction();
        let result = self.document.undo(&mut self.surface);
        self.finish_history_step("Undid", result, abandoned)
    }

    pub fn redo(&mut self) -> EditorResponse {
        let abandoned = self.abandon_interaction();
        let result = self.document.redo(&mut self.surface);
        self.finish_history_step("Redid", result, abandoned)
    }

    fn finish_history_step(
        &mut self,
        verb: &str,
        result: HistoryResult<Applied>,
        abandoned: bool,
    ) -> EditorResponse {
        match result {
            Ok(Applied { command, changed }) if changed => {
                log::info!("{} {}", verb, command);
                self.document.redraw(&mut self.renderer, &mut self.surface);
                EditorResponse::redraw()
            }
            Ok(Applied { command, .. }) => {
                log::info!("{} {}, already cleared", verb, command);
                self.document.redraw(&mut self.renderer, &mut self.surface);
                let message = format!("{} was cleared", command);
                EditorResponse::redraw().with(Effect::Status(message))
            }
            Err(err) => {
                log::warn!("{}", err);
                if !abandoned {
                    return EditorResponse::status(err.to_string());
                }
                // drop the half-drawn preview
                self.document.redraw(&mut self.renderer, &mut self.surface);
                EditorResponse::redraw().with(Effect::Status(err.to_string()))
            }
        }
    }

    /// Rotates by the configured step about the canvas center.
    pub fn rotate(&mut self) -> EditorResponse {
        self.rotate_by(self.config.rotate_step_degrees)
    }

    pub fn rotate_by(&mut self, angle_degrees: f32) -> EditorResponse {
        self.abandon_interaction();
        let pivot = self.config.pivot();
        let (renderer, surface) = (&mut self.renderer, &mut self.surface);
        self.document.rotate_all(angle_degrees, pivot, renderer, surface);
        EditorResponse::redraw()
    }

    pub fn zoom_in(&mut self) -> EditorResponse {
        let f = self.config.zoom_in_factor;
        self.scale_by(f, f)
    }

    pub fn zoom_out(&mut self) -> EditorResponse {
        let f = self.config.zoom_out_factor;
        self.scale_by(f, f)
    }

    pub fn scale_by(&mut self, factor_x: f32, factor_y: f32) -> EditorResponse {
        self.abandon_interaction();
        let pivot = self.config.pivot();
        let (renderer, surface) = (&mut self.renderer, &mut self.surface);
        self.document.scale_all(factor_x, factor_y, pivot, renderer, surface);
        EditorResponse::redraw()
    }

    pub fn clear(&mut self) -> EditorResponse {
        self.state = EditorState::Idle;
        self.document.clear(&mut self.surface);
        EditorResponse::redraw()
    }

    /// Re-renders the whole document onto the surface.
    pub fn redraw(&mut self) -> EditorResponse {
        self.abandon_interaction();
        self.document.redraw(&mut self.renderer, &mut self.surface);
        EditorResponse::redraw()
    }
}
