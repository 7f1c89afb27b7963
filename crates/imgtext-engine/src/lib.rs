//! Image-to-text extraction for imgtext.
//!
//! This crate decodes an image file and hands the bitmap to an OCR backend.
//! It is shared by the `imgtext` CLI and the `imgtext-gui` desktop app.

pub mod config;
pub mod error;
pub mod extractor;
pub mod ocr;

pub use config::{EngineConfig, EngineKind, DEFAULT_LANG};
pub use error::{ExtractError, NOT_FOUND_MESSAGE};
pub use extractor::{load_image, Extractor};
pub use ocr::{OcrBackend, Recognition};

/// File extensions offered by the desktop open dialog.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "tiff"];

/// Whether `path` has one of the [`SUPPORTED_EXTENSIONS`], ignoring case.
pub fn has_supported_extension(path: &std::path::Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| supported.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}
