use egui::{Color32, Sense};

use crate::SketchApp;

pub fn central_panel(app: &mut SketchApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let size = app.editor().config().canvas_size();
        let (response, painter) = ui.allocate_painter(size, Sense::click_and_drag());
        let canvas_rect = response.rect;
        let origin = canvas_rect.min.to_vec2();

        painter.rect_filled(canvas_rect, 0.0, Color32::WHITE);
        app.editor().surface().paint(&painter.with_clip_rect(canvas_rect), origin);

        let events = app.input_mut().process_response(&response, origin);
        for event in events {
            let result = app.editor_mut().handle_event(event);
            app.apply(ctx, result);
        }
    });
}
