use crate::SketchApp;

pub fn status_panel(app: &mut SketchApp, ctx: &egui::Context) {
    egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.label(format!("State: {}", app.editor().state().name()));
            ui.separator();
            let document = app.editor().document();
            ui.label(format!(
                "{} strokes, {} shapes",
                document.strokes().len(),
                document.shapes().live_count()
            ));
            ui.separator();
            ui.label(app.status());
        });
    });
}

/// Modal asking for the text to place. Enter confirms, Escape cancels.
pub fn text_prompt(app: &mut SketchApp, ctx: &egui::Context) {
    let Some(prompt) = app.text_prompt_mut() else {
        return;
    };

    let mut answer = None;
    egui::Window::new("Add Text")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(ctx, |ui| {
            ui.label(format!("Text at ({:.0}, {:.0})", prompt.at.x, prompt.at.y));
            let edit = ui.text_edit_singleline(&mut prompt.buffer);
            edit.request_focus();

            let entered = edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            ui.horizontal(|ui| {
                if ui.button("OK").clicked() || entered {
                    answer = Some(Some(prompt.buffer.clone()));
                }
                let escaped = ui.input(|i| i.key_pressed(egui::Key::Escape));
                if ui.button("Cancel").clicked() || escaped {
                    answer = Some(None);
                }
            });
        });

    if let Some(text) = answer {
        app.finish_text_prompt(ctx, text);
    }
}
