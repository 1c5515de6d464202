use egui::{Color32, Pos2, Rect};

use crate::config::SketchConfig;
use crate::error::CaptureError;
use crate::geometry::WarpError;
use crate::input::{self, InputHandler, Shortcut};
use crate::panels::{
    central_panel, status_panel, text_prompt, toolbar, tools_panel, transform_panel,
};
use crate::renderer::DisplayList;
use crate::state::{EditorContext, EditorResponse, Effect};
use crate::tools::ToolSettings;

/// Text the user is typing for a pending placement.
#[derive(Debug, Clone, Default)]
pub struct TextPrompt {
    pub at: Pos2,
    pub buffer: String,
}

/// We derive Deserialize/Serialize so we can persist tool settings on shutdown.
#[derive(serde::Deserialize, serde::Serialize, Debug)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct SketchApp {
    settings: ToolSettings,
    // Drawings are not persisted
    #[serde(skip)]
    editor: EditorContext<DisplayList>,
    #[serde(skip)]
    input: InputHandler,
    #[serde(skip)]
    status: String,
    #[serde(skip)]
    text_prompt: Option<TextPrompt>,
}

impl Default for SketchApp {
    fn default() -> Self {
        Self::with_config(SketchConfig::default(), ToolSettings::default())
    }
}

impl SketchApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, config: SketchConfig) -> Self {
        let settings = cc
            .storage
            .and_then(|storage| eframe::get_value::<SketchApp>(storage, eframe::APP_KEY))
            .map(|restored| restored.settings)
            .unwrap_or_else(|| ToolSettings::from_config(&config));
        log::info!(
            "Starting with tool {} and color {}",
            settings.tool.name(),
            crate::color::to_hex(settings.color)
        );
        Self::with_config(config, settings)
    }

    pub fn with_config(config: SketchConfig, settings: ToolSettings) -> Self {
        Self {
            settings: settings.clone(),
            editor: EditorContext::with_settings(config, settings, DisplayList::new()),
            input: InputHandler::new(),
            status: String::new(),
            text_prompt: None,
        }
    }

    pub fn editor(&self) -> &EditorContext<DisplayList> {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut EditorContext<DisplayList> {
        &mut self.editor
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn text_prompt_mut(&mut self) -> Option<&mut TextPrompt> {
        self.text_prompt.as_mut()
    }

    pub fn input_mut(&mut self) -> &mut InputHandler {
        &mut self.input
    }

    /// Answers the pending text prompt; `None` cancels it.
    pub fn finish_text_prompt(&mut self, ctx: &egui::Context, text: Option<String>) {
        self.text_prompt = None;
        match self.editor.submit_text(text) {
            Ok(response) => self.apply(ctx, response),
            Err(err) => log::warn!("Dropping text input: {}", err),
        }
    }

    /// Carries out the effects an editor call asked for.
    pub fn apply(&mut self, ctx: &egui::Context, response: EditorResponse) {
        for effect in response.effects {
            match effect {
                Effect::Redraw => ctx.request_repaint(),
                Effect::RequestText { at } => {
                    self.text_prompt = Some(TextPrompt {
                        at,
                        buffer: String::new(),
                    });
                }
                Effect::SampleColor { at } => {
                    let sampled = self.sample_color(at);
                    match self.editor.apply_sampled_color(sampled) {
                        Ok(response) => self.apply(ctx, response),
                        Err(err) => log::warn!("Dropping sampled color: {}", err),
                    }
                }
                Effect::Warp(transform) => {
                    log::debug!("Warp requested: {:?}", transform);
                    let unavailable = "raster warping is not available".to_string();
                    let result = Err(WarpError::Backend(unavailable));
                    let response = self.editor.report_warp_result(result);
                    self.apply(ctx, response);
                }
                Effect::Status(message) => self.status = message,
            }
        }
    }

    fn sample_color(&self, at: Pos2) -> Result<Color32, CaptureError> {
        let canvas = Rect::from_min_size(Pos2::ZERO, self.editor.config().canvas_size());
        if !canvas.contains(at) {
            return Err(CaptureError::OutOfBounds {
                x: at.x as i32,
                y: at.y as i32,
            });
        }
        Ok(self.editor.surface().color_at(at))
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        // keys belong to the prompt or picker while the editor waits on them
        if self.text_prompt.is_some() || self.editor.state().is_awaiting_ui() {
            return;
        }
        let response = match input::read_shortcut(ctx) {
            Some(Shortcut::Undo) => self.editor.undo(),
            Some(Shortcut::Redo) => self.editor.redo(),
            None => return,
        };
        self.apply(ctx, response);
    }
}

impl eframe::App for SketchApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.settings = self.editor.settings().clone();
        eframe::set_value(storage, eframe::APP_KEY, self);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_shortcuts(ctx);

        toolbar(self, ctx);
        status_panel(self, ctx);
        tools_panel(self, ctx);
        transform_panel(self, ctx);
        central_panel(self, ctx);
        text_prompt(self, ctx);
    }
}
