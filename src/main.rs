#![warn(clippy::all, rust_2018_idioms)]

use eframe_sketch::{SketchApp, SketchConfig};
use env_logger::Env;

/// Path of an optional JSON config file.
const CONFIG_ENV: &str = "SKETCH_CONFIG";

fn load_config() -> SketchConfig {
    let Ok(path) = std::env::var(CONFIG_ENV) else {
        return SketchConfig::default();
    };
    match SketchConfig::load(&path) {
        Ok(config) => {
            log::info!("Loaded config from {}", path);
            config
        }
        Err(err) => {
            log::warn!("Ignoring config {}: {}", path, err);
            SketchConfig::default()
        }
    }
}

fn main() -> eframe::Result {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = load_config();
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.canvas_width + 360.0, config.canvas_height + 90.0])
            .with_min_inner_size([480.0, 360.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Sketch",
        native_options,
        Box::new(move |cc| Ok(Box::new(SketchApp::new(cc, config)))),
    )
}
