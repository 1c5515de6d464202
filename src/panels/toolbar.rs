use egui::color_picker::{Alpha, color_edit_button_srgba};

use crate::SketchApp;
use crate::components::ToolButton;
use crate::stroke::BrushStyle;
use crate::tools::Tool;

pub fn toolbar(app: &mut SketchApp, ctx: &egui::Context) {
    egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            let active = app.editor().settings().tool;
            for tool in Tool::TOOLBAR {
                if ToolButton::new(tool, active == tool).show(ui).clicked() {
                    let response = app.editor_mut().set_tool(tool);
                    app.apply(ctx, response);
                }
            }

            ui.separator();

            let mut color = app.editor().settings().color;
            if color_edit_button_srgba(ui, &mut color, Alpha::Opaque).changed() {
                app.editor_mut().set_color(color);
            }

            let mut brush = app.editor().settings().brush;
            egui::ComboBox::from_id_salt("brush_style")
                .selected_text(brush.name())
                .show_ui(ui, |ui| {
                    for style in BrushStyle::ALL {
                        ui.selectable_value(&mut brush, style, style.name());
                    }
                });
            if brush != app.editor().settings().brush {
                log::info!("Brush changed to {}", brush.name());
                app.editor_mut().set_brush(brush);
            }

            ui.separator();

            let history = app.editor().document().history();
            let (can_undo, can_redo) = (history.can_undo(), history.can_redo());
            if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
                let response = app.editor_mut().undo();
                app.apply(ctx, response);
            }
            if ui.add_enabled(can_redo, egui::Button::new("Redo")).clicked() {
                let response = app.editor_mut().redo();
                app.apply(ctx, response);
            }
            if ui.button("Clear").clicked() {
                let response = app.editor_mut().clear();
                app.apply(ctx, response);
            }
        });
    });
}
