//! eframe application: toolbar, preview pane and text pane.

use eframe::egui::{self, load::SizedTexture, ColorImage, TextureHandle, TextureOptions};
use imgtext_engine::{EngineConfig, Extractor, SUPPORTED_EXTENSIONS};
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageLevel};
use tracing::debug;

use crate::state::ViewerState;

/// Extraction runs on the UI thread, so it is deferred until the frame
/// showing the processing message has been painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    None,
    Requested,
    Painted,
}

pub struct ImgTextApp {
    state: ViewerState,
    extractor: Extractor,
    texture: Option<(u64, TextureHandle)>,
    pending: Pending,
}

impl ImgTextApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self {
            state: ViewerState::new(),
            extractor: Extractor::new(EngineConfig::default()),
            texture: None,
            pending: Pending::None,
        }
    }

    fn open_dialog(&mut self) {
        let picked = FileDialog::new()
            .set_title("Open Image")
            .add_filter("Image files", SUPPORTED_EXTENSIONS)
            .pick_file();

        if let Some(path) = picked {
            debug!("Opening {:?}", path);
            self.state.open(path);
        }
    }

    /// Upload the preview when a new image has been opened.
    fn sync_texture(&mut self, ctx: &egui::Context) {
        let Some(preview) = self.state.preview() else {
            self.texture = None;
            return;
        };

        let stale = self
            .texture
            .as_ref()
            .map_or(true, |(generation, _)| *generation != preview.generation);
        if stale {
            let image = ColorImage::from_rgba_unmultiplied(preview.size, &preview.rgba);
            let handle = ctx.load_texture("preview", image, TextureOptions::LINEAR);
            self.texture = Some((preview.generation, handle));
        }
    }
}

fn show_error(message: &str) {
    let _ = MessageDialog::new()
        .set_level(MessageLevel::Error)
        .set_title("Error")
        .set_description(message)
        .set_buttons(MessageButtons::Ok)
        .show();
}

impl eframe::App for ImgTextApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.pending == Pending::Painted {
            self.pending = Pending::None;
            self.state.finish_extract(&self.extractor);
        }

        if let Some(message) = self.state.take_error() {
            show_error(&message);
        }

        self.sync_texture(ctx);

        let mut open_clicked = false;
        let mut extract_clicked = false;

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                open_clicked = ui
                    .add_enabled(self.state.can_open(), egui::Button::new("Open Image"))
                    .clicked();
                extract_clicked = ui
                    .add_enabled(self.state.can_extract(), egui::Button::new("Extract Text"))
                    .clicked();
            });
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.label(self.state.status());
        });

        egui::SidePanel::right("text")
            .resizable(true)
            .default_width(360.0)
            .show(ctx, |ui| {
                ui.heading("Extracted Text");
                ui.separator();
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let mut text = self.state.output();
                    ui.add(
                        egui::TextEdit::multiline(&mut text)
                            .desired_width(f32::INFINITY)
                            .desired_rows(20),
                    );
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.centered_and_justified(|ui| match &self.texture {
                Some((_, texture)) => {
                    let image = egui::Image::from_texture(SizedTexture::from_handle(texture))
                        .max_size(ui.available_size())
                        .maintain_aspect_ratio(true);
                    let response = ui.add(image);
                    if let Some(path) = self.state.image_path() {
                        response.on_hover_text(path.display().to_string());
                    }
                }
                None => {
                    ui.label("No image loaded");
                }
            });
        });

        if self.pending == Pending::Requested {
            self.pending = Pending::Painted;
            ctx.request_repaint();
        }

        if open_clicked {
            self.open_dialog();
        }

        if extract_clicked && self.state.begin_extract() {
            self.pending = Pending::Requested;
            ctx.request_repaint();
        }
    }
}
