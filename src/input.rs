use egui::{Context, Key, Modifiers, Pos2, Response, Vec2};

/// Pointer events in canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Primary button was pressed
    PointerDown(Pos2),
    /// Pointer moved while the primary button is held
    PointerMove(Pos2),
    /// Primary button was released
    PointerUp(Pos2),
}

impl InputEvent {
    pub fn position(&self) -> Pos2 {
        match self {
            InputEvent::PointerDown(p)
            | InputEvent::PointerMove(p)
            | InputEvent::PointerUp(p) => *p,
        }
    }
}

/// Keyboard shortcuts handled by the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    Undo,
    Redo,
}

/// What the canvas widget saw this frame, in screen coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerFrame {
    /// Current pointer position while interacting
    pub pos: Option<Pos2>,
    /// Where the primary button went down
    pub press_origin: Option<Pos2>,
    pub drag_started: bool,
    pub dragged: bool,
    pub drag_stopped: bool,
    pub clicked: bool,
}

impl PointerFrame {
    pub fn from_response(response: &Response) -> Self {
        Self {
            pos: response.interact_pointer_pos(),
            press_origin: response.ctx.input(|i| i.pointer.press_origin()),
            drag_started: response.drag_started(),
            dragged: response.dragged(),
            drag_stopped: response.drag_stopped(),
            clicked: response.clicked(),
        }
    }
}

/// Converts egui canvas interaction into [`InputEvent`]s.
#[derive(Debug, Default)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps the canvas widget response to press/drag/release events.
    ///
    /// `origin` is the screen position of the canvas top-left corner.
    pub fn process_response(&mut self, response: &Response, origin: Vec2) -> Vec<InputEvent> {
        self.process_frame(PointerFrame::from_response(response), origin)
    }

    /// A drag is only reported once the pointer has moved past egui's drag
    /// threshold, so the press event uses the press origin rather than the
    /// current position.
    pub fn process_frame(&mut self, frame: PointerFrame, origin: Vec2) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let Some(screen_pos) = frame.pos.or(self.last_pointer_pos) else {
            return events;
        };
        let canvas_pos = screen_pos - origin;

        if frame.drag_started {
            let pressed_at = frame.press_origin.unwrap_or(screen_pos);
            events.push(InputEvent::PointerDown(pressed_at - origin));
            if pressed_at != screen_pos {
                events.push(InputEvent::PointerMove(canvas_pos));
            }
        } else if frame.dragged && self.last_pointer_pos != Some(screen_pos) {
            events.push(InputEvent::PointerMove(canvas_pos));
        }

        if frame.drag_stopped {
            events.push(InputEvent::PointerUp(canvas_pos));
            self.last_pointer_pos = None;
        } else if frame.clicked {
            // a click without movement never starts a drag
            events.push(InputEvent::PointerDown(canvas_pos));
            events.push(InputEvent::PointerUp(canvas_pos));
            self.last_pointer_pos = None;
        } else if frame.dragged {
            self.last_pointer_pos = Some(screen_pos);
        }

        events
    }
}

/// Reads Ctrl+Z / Ctrl+Y (Cmd on macOS) from this frame's input.
pub fn read_shortcut(ctx: &Context) -> Option<Shortcut> {
    ctx.input_mut(|i| {
        if i.consume_key(Modifiers::COMMAND, Key::Z) {
            Some(Shortcut::Undo)
        } else if i.consume_key(Modifiers::COMMAND, Key::Y) {
            Some(Shortcut::Redo)
        } else {
            None
        }
    })
}
