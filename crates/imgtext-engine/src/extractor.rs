//! Open an image file and run it through the configured backend.

use std::io::ErrorKind;
use std::path::Path;
use std::sync::OnceLock;

use image::{DynamicImage, ImageReader};
use imgtext_protocol::ExtractionReport;
use tracing::{debug, error};

use crate::config::EngineConfig;
use crate::error::ExtractError;
use crate::ocr::{build_backend, OcrBackend};

/// Decode the image at `path`.
///
/// A missing file is reported as [`ExtractError::NotFound`]; every other
/// read or decode problem keeps its underlying error.
pub fn load_image(path: &Path) -> Result<DynamicImage, ExtractError> {
    let reader = ImageReader::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ExtractError::NotFound(path.to_path_buf()),
        _ => ExtractError::Io(e),
    })?;

    let image = reader.with_guessed_format()?.decode()?;
    debug!(
        "Decoded {:?}: {}x{}",
        path,
        image.width(),
        image.height()
    );
    Ok(image)
}

/// Runs extractions with one lazily built backend.
///
/// The backend is created on the first extraction that gets past decoding,
/// so a missing file never loads models or looks up executables. A failed
/// initialization is remembered and reported on every later call.
pub struct Extractor {
    config: EngineConfig,
    backend: OnceLock<Result<Box<dyn OcrBackend>, String>>,
}

impl Extractor {
    /// Create an extractor for `config`.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            backend: OnceLock::new(),
        }
    }

    /// Create an extractor around an already built backend.
    pub fn with_backend(config: EngineConfig, backend: Box<dyn OcrBackend>) -> Self {
        let cell = OnceLock::new();
        let _ = cell.set(Ok(backend));
        Self {
            config,
            backend: cell,
        }
    }

    fn backend(&self) -> Result<&dyn OcrBackend, ExtractError> {
        let backend = self.backend.get_or_init(|| {
            build_backend(&self.config).map_err(|e| {
                error!("Failed to initialize OCR engine: {:#}", e);
                format!("{:#}", e)
            })
        });

        match backend {
            Ok(backend) => Ok(backend.as_ref()),
            Err(msg) => Err(ExtractError::EngineUnavailable(msg.clone())),
        }
    }

    /// Decode `path` and recognize its text.
    pub fn extract(&self, path: &Path) -> Result<ExtractionReport, ExtractError> {
        let image = load_image(path)?;
        let backend = self.backend()?;

        let recognition = backend.recognize(&image, &self.config.lang)?;
        debug!(
            "{} recognized {} lines in {:?}",
            backend.name(),
            recognition.lines.len(),
            path
        );

        Ok(ExtractionReport {
            path: path.display().to_string(),
            engine: backend.name().to_string(),
            lang: self.config.lang.clone(),
            width: image.width(),
            height: image.height(),
            text: recognition.text,
            lines: recognition.lines,
        })
    }

    /// Recognized text, or the user-facing error message in its place.
    pub fn image_to_text(&self, path: &Path) -> String {
        match self.extract(path) {
            Ok(report) => report.text,
            Err(e) => e.user_message(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineKind;
    use crate::ocr::Recognition;
    use image::{ImageBuffer, Rgb};
    use std::path::PathBuf;
    use tempfile::TempDir;

    struct FixedText(&'static str);

    impl OcrBackend for FixedText {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn recognize(
            &self,
            _image: &DynamicImage,
            lang: &str,
        ) -> Result<Recognition, ExtractError> {
            assert_eq!(lang, "eng");
            Ok(Recognition::from_text(self.0.to_string()))
        }
    }

    fn write_png(dir: &TempDir, name: &str, width: u32, height: u32) -> PathBuf {
        let path = dir.path().join(name);
        ImageBuffer::from_pixel(width, height, Rgb([255u8, 255, 255]))
            .save(&path)
            .unwrap();
        path
    }

    /// An extractor whose backend can never be built.
    fn broken_extractor(models: &TempDir) -> Extractor {
        Extractor::new(EngineConfig {
            engine: EngineKind::Ocrs,
            models_dir: Some(models.path().to_path_buf()),
            ..EngineConfig::default()
        })
    }

    #[test]
    fn test_missing_file_message() {
        let dir = TempDir::new().unwrap();
        let extractor = broken_extractor(&dir);

        let missing = dir.path().join("does-not-exist.png");
        assert_eq!(
            extractor.image_to_text(&missing),
            "Error: Image file not found."
        );
        // Decoding fails first, so the backend was never built.
        assert!(extractor.backend.get().is_none());
    }

    #[test]
    fn test_extract_returns_backend_text() {
        let dir = TempDir::new().unwrap();
        let path = write_png(&dir, "scan.png", 64, 32);
        let extractor = Extractor::with_backend(
            EngineConfig::default(),
            Box::new(FixedText("Invoice 1234\nTotal: 42.00\n")),
        );

        let report = extractor.extract(&path).unwrap();
        assert!(report.text.contains("Invoice 1234"));
        assert_eq!(report.engine, "fixed");
        assert_eq!((report.width, report.height), (64, 32));
        assert_eq!(report.lines.len(), 2);
    }

    #[test]
    fn test_blank_result_is_blank() {
        let dir = TempDir::new().unwrap();
        let path = write_png(&dir, "blank.png", 16, 16);
        let extractor =
            Extractor::with_backend(EngineConfig::default(), Box::new(FixedText(" \n\x0c")));

        let report = extractor.extract(&path).unwrap();
        assert!(report.is_blank());
        assert!(report.lines.is_empty());
    }

    #[test]
    fn test_undecodable_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.png");
        std::fs::write(&path, b"this is not an image").unwrap();

        let extractor = Extractor::with_backend(EngineConfig::default(), Box::new(FixedText("")));
        let err = extractor.extract(&path).unwrap_err();
        assert!(matches!(err, ExtractError::Decode(_)));
        assert!(extractor
            .image_to_text(&path)
            .starts_with("An error occurred: "));
    }

    #[test]
    fn test_engine_failure_is_remembered() {
        let models = TempDir::new().unwrap();
        let path = write_png(&models, "scan.png", 8, 8);
        let extractor = broken_extractor(&models);

        for _ in 0..2 {
            match extractor.extract(&path) {
                Err(ExtractError::EngineUnavailable(msg)) => {
                    assert!(msg.contains("Could not find"));
                }
                other => panic!("Expected EngineUnavailable, got {:?}", other),
            }
        }
        assert!(extractor
            .image_to_text(&path)
            .starts_with("An error occurred: OCR engine unavailable"));
    }
}
