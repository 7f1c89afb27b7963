//! OCR (Optical Character Recognition) backends.
//!
//! Each backend turns a decoded bitmap into text. The ocrs backend runs
//! in-process; the tesseract backend drives an external executable.

mod engine;
mod models;
mod tesseract;

use anyhow::Result;
use image::DynamicImage;
use imgtext_protocol::TextLine;
use tracing::debug;

use crate::config::{EngineConfig, EngineKind};
use crate::error::ExtractError;

pub use engine::OcrsBackend;
pub use models::{candidate_models_dirs, find_models_dir, has_models};
pub use tesseract::{TesseractBackend, DEFAULT_TESSERACT_CMD};

/// Text recognized in one image.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Recognition {
    /// Full text, lines separated by `\n`.
    pub text: String,
    /// Non-blank lines in reading order.
    pub lines: Vec<TextLine>,
}

impl Recognition {
    /// Build a recognition from raw engine output, keeping only non-blank lines.
    pub fn from_text(text: String) -> Self {
        let lines = text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| TextLine {
                text: line.trim_end().to_string(),
                bounds: None,
            })
            .collect();
        Self { text, lines }
    }
}

/// An OCR engine that recognizes text in a bitmap.
pub trait OcrBackend {
    /// Short engine name used in reports and logs.
    fn name(&self) -> &'static str;

    /// Recognize text in `image` using language `lang`.
    fn recognize(&self, image: &DynamicImage, lang: &str) -> Result<Recognition, ExtractError>;
}

/// Build the backend selected by `config`.
pub fn build_backend(config: &EngineConfig) -> Result<Box<dyn OcrBackend>> {
    match config.engine {
        EngineKind::Ocrs => {
            let models_dir = find_models_dir(config.models_dir.as_deref())?;
            Ok(Box::new(OcrsBackend::new(&models_dir)?))
        }
        EngineKind::Tesseract => Ok(Box::new(TesseractBackend::new(
            config.tesseract_cmd.clone(),
        ))),
        EngineKind::Auto => match find_models_dir(config.models_dir.as_deref()) {
            Ok(models_dir) => Ok(Box::new(OcrsBackend::new(&models_dir)?)),
            Err(e) => {
                debug!("ocrs models unavailable ({:#}), using tesseract", e);
                Ok(Box::new(TesseractBackend::new(config.tesseract_cmd.clone())))
            }
        },
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_from_text_skips_blank_lines() {
        let rec = Recognition::from_text("Hello World  \n\n  \nsecond line\n".to_string());
        assert_eq!(rec.lines.len(), 2);
        assert_eq!(rec.lines[0].text, "Hello World");
        assert_eq!(rec.lines[1].text, "second line");
        assert!(rec.lines.iter().all(|l| l.bounds.is_none()));
    }

    #[test]
    fn test_rendered_text_has_ink() {
        let image = fixtures::render_text("HI").to_luma8();
        let dark = image.pixels().filter(|p| p.0[0] == 0).count();
        assert!(dark > 0);
        // Unknown characters render as blank cells.
        assert_eq!(
            fixtures::render_text("??").to_luma8().pixels().filter(|p| p.0[0] == 0).count(),
            0
        );
    }

    #[test]
    fn test_auto_falls_back_to_tesseract() {
        let empty = tempfile::TempDir::new().unwrap();
        let config = EngineConfig {
            models_dir: Some(empty.path().to_path_buf()),
            tesseract_cmd: Some(PathBuf::from("/opt/tess/bin/tesseract")),
            ..EngineConfig::default()
        };

        let backend = build_backend(&config).unwrap();
        assert_eq!(backend.name(), "tesseract");
    }

    #[test]
    fn test_ocrs_without_models_fails() {
        let empty = tempfile::TempDir::new().unwrap();
        let config = EngineConfig {
            engine: EngineKind::Ocrs,
            models_dir: Some(empty.path().to_path_buf()),
            ..EngineConfig::default()
        };

        assert!(build_backend(&config).is_err());
    }
}
