use crate::SketchApp;
use crate::tools::Tool;

pub fn tools_panel(app: &mut SketchApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(180.0)
        .show(ctx, |ui| {
            ui.heading("Shapes");

            let active = app.editor().settings().tool;
            for tool in Tool::SHAPES {
                if ui.selectable_label(active == tool, tool.name()).clicked() {
                    log::info!("Tool selected from UI: {}", tool.name());
                    let response = app.editor_mut().set_tool(tool);
                    app.apply(ctx, response);
                }
            }

            ui.separator();

            let (min, max) = {
                let config = app.editor().config();
                (config.min_thickness, config.max_thickness)
            };
            let mut thickness = app.editor().settings().thickness;
            ui.label("Thickness");
            if ui.add(egui::Slider::new(&mut thickness, min..=max)).changed() {
                app.editor_mut().set_thickness(thickness);
            }

            let mut opacity = app.editor().settings().opacity;
            ui.label("Opacity");
            if ui.add(egui::Slider::new(&mut opacity, 0.0..=1.0)).changed() {
                app.editor_mut().set_opacity(opacity);
            }

            ui.separator();

            let history = app.editor().document().history();
            ui.horizontal(|ui| {
                ui.label(format!("Undo stack size: {}", history.undo_stack().len()));
                ui.label(format!("Redo stack size: {}", history.redo_stack().len()));
            });

            egui::Grid::new("command_history_grid")
                .num_columns(2)
                .spacing([40.0, 4.0])
                .striped(true)
                .show(ui, |ui| {
                    ui.strong("Undo Stack");
                    ui.strong("Redo Stack");
                    ui.end_row();

                    let undo_stack = history.undo_stack();
                    let redo_stack = history.redo_stack();
                    for i in 0..undo_stack.len().max(redo_stack.len()) {
                        match undo_stack.get(i) {
                            Some(command) => ui.label(command.to_string()),
                            None => ui.label(""),
                        };
                        match redo_stack.get(i) {
                            Some(command) => ui.label(command.to_string()),
                            None => ui.label(""),
                        };
                        ui.end_row();
                    }
                });
        });
}
