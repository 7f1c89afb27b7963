//! OCR engine wrapper using the ocrs library.

use std::path::Path;

use anyhow::{Context, Result};
use image::DynamicImage;
use imgtext_protocol::{BoundingBox, TextLine};
use ocrs::{ImageSource, OcrEngine, OcrEngineParams, TextItem};
use rten::Model;
use tracing::{debug, trace};

use super::models::{DETECTION_MODEL, RECOGNITION_MODEL};
use super::{OcrBackend, Recognition};
use crate::error::ExtractError;

const ENGINE_NAME: &str = "ocrs";

/// ocrs ships a single Latin-alphabet model set.
const SUPPORTED_LANG: &str = "eng";

/// In-process OCR backend.
pub struct OcrsBackend {
    engine: OcrEngine,
}

impl OcrsBackend {
    /// Load the detection and recognition models from `models_dir`.
    pub fn new(models_dir: &Path) -> Result<Self> {
        let detection_model = load_model(models_dir, DETECTION_MODEL, "detection")?;
        let recognition_model = load_model(models_dir, RECOGNITION_MODEL, "recognition")?;

        let engine = OcrEngine::new(OcrEngineParams {
            detection_model: Some(detection_model),
            recognition_model: Some(recognition_model),
            ..Default::default()
        })
        .context("Failed to create OCR engine")?;

        debug!("ocrs engine ready (models in {:?})", models_dir);
        Ok(Self { engine })
    }

    /// Detect, group and recognize; blank lines are dropped.
    fn read_lines(&self, image: &DynamicImage) -> Result<Vec<TextLine>> {
        let rgb = image.to_rgb8();
        let dimensions = rgb.dimensions();
        trace!("Running ocrs on {}x{} bitmap", dimensions.0, dimensions.1);

        let source = ImageSource::from_bytes(rgb.as_raw(), dimensions)
            .context("Failed to wrap bitmap for ocrs")?;
        let input = self
            .engine
            .prepare_input(source)
            .context("Failed to prepare OCR input")?;

        let words = self
            .engine
            .detect_words(&input)
            .context("Failed to detect words")?;
        let line_regions = self.engine.find_text_lines(&input, &words);
        trace!(
            "{} words grouped into {} lines",
            words.len(),
            line_regions.len()
        );

        let recognized = self
            .engine
            .recognize_text(&input, &line_regions)
            .context("Failed to recognize text")?;

        let lines: Vec<TextLine> = recognized
            .iter()
            .flatten()
            .filter_map(|line| {
                let text = line.to_string();
                if text.trim().is_empty() {
                    return None;
                }
                let bounds = BoundingBox::union(line.words().map(|word| {
                    let rect = word.bounding_rect();
                    BoundingBox::from_edges(
                        rect.left() as i32,
                        rect.top() as i32,
                        (rect.left() + rect.width()) as i32,
                        (rect.top() + rect.height()) as i32,
                    )
                }));
                Some(TextLine { text, bounds })
            })
            .collect();

        debug!("ocrs recognized {} lines", lines.len());
        Ok(lines)
    }
}

fn load_model(models_dir: &Path, file: &str, kind: &str) -> Result<Model> {
    let path = models_dir.join(file);
    debug!("Loading ocrs {} model from {:?}", kind, path);
    Model::load_file(&path)
        .with_context(|| format!("Failed to load {} model from {:?}", kind, path))
}

impl OcrBackend for OcrsBackend {
    fn name(&self) -> &'static str {
        ENGINE_NAME
    }

    fn recognize(&self, image: &DynamicImage, lang: &str) -> Result<Recognition, ExtractError> {
        check_language(lang)?;

        let lines = self
            .read_lines(image)
            .map_err(|e| ExtractError::Recognition(format!("{:#}", e)))?;

        let text = lines
            .iter()
            .map(|line| line.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        Ok(Recognition { text, lines })
    }
}

fn check_language(lang: &str) -> Result<(), ExtractError> {
    if lang.eq_ignore_ascii_case(SUPPORTED_LANG) {
        Ok(())
    } else {
        Err(ExtractError::UnsupportedLanguage {
            engine: ENGINE_NAME,
            lang: lang.to_string(),
        })
    }
}
