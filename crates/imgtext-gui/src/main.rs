//! imgtext-gui: open an image and extract its text.

mod app;
mod state;

use eframe::egui;
use tracing_subscriber::EnvFilter;

use app::ImgTextApp;

fn main() -> eframe::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Image to Text")
            .with_inner_size([960.0, 640.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "imgtext",
        options,
        Box::new(|cc| Ok(Box::new(ImgTextApp::new(cc)))),
    )
}
