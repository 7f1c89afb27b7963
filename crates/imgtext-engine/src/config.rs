//! Engine configuration.

use std::fmt;
use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Language requested when none is configured.
pub const DEFAULT_LANG: &str = "eng";

/// Which OCR backend to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum EngineKind {
    /// ocrs when its models are installed, tesseract otherwise.
    #[default]
    Auto,
    /// The bundled ocrs engine.
    Ocrs,
    /// An external tesseract executable.
    Tesseract,
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Auto => "auto",
            Self::Ocrs => "ocrs",
            Self::Tesseract => "tesseract",
        };
        f.write_str(name)
    }
}

/// Settings for building an OCR backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Backend selection.
    pub engine: EngineKind,

    /// Language code passed to the backend.
    pub lang: String,

    /// Path to the tesseract executable. Defaults to `tesseract` on PATH.
    pub tesseract_cmd: Option<PathBuf>,

    /// Directory holding the ocrs `.rten` models.
    pub models_dir: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            engine: EngineKind::Auto,
            lang: DEFAULT_LANG.to_string(),
            tesseract_cmd: None,
            models_dir: None,
        }
    }
}
