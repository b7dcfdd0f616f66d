#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use std::path::Path;

use virtual_painter::{AppConfig, PainterApp};

const CONFIG_PATH: &str = "virtual-painter.json";

/// Room for the menu bar above the canvas.
const MENU_BAR_ALLOWANCE: f32 = 48.0;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let config = AppConfig::load_or_default(Path::new(CONFIG_PATH))?;
    let [width, height] = config.canvas_size;

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([width as f32 + 16.0, height as f32 + MENU_BAR_ALLOWANCE])
            .with_title("Virtual Painter"),
        ..Default::default()
    };
    eframe::run_native(
        "Virtual Painter",
        native_options,
        Box::new(move |cc| Ok(Box::new(PainterApp::new(cc, config)))),
    )?;
    Ok(())
}
