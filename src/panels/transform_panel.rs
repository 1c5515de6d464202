use crate::SketchApp;

pub fn transform_panel(app: &mut SketchApp, ctx: &egui::Context) {
    egui::SidePanel::right("transform_panel")
        .resizable(false)
        .default_width(120.0)
        .show(ctx, |ui| {
            ui.heading("Canvas");

            let response = if ui.button("Rotate").clicked() {
                Some(app.editor_mut().rotate())
            } else if ui.button("Zoom In").clicked() {
                Some(app.editor_mut().zoom_in())
            } else if ui.button("Zoom Out").clicked() {
                Some(app.editor_mut().zoom_out())
            } else {
                None
            };

            if let Some(response) = response {
                app.apply(ctx, response);
            }
        });
}
