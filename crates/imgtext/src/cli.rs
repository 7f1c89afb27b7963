//! CLI definition using clap.

use std::path::PathBuf;

use clap::Parser;
use imgtext_engine::{EngineConfig, EngineKind, DEFAULT_LANG};

/// Usage line printed when the arguments cannot be parsed.
pub const USAGE: &str = "Usage: imgtext <path_to_image>";

/// Print the text found in an image file.
#[derive(Parser, Debug)]
#[command(name = "imgtext")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Image file to read
    #[arg(value_name = "PATH_TO_IMAGE", allow_hyphen_values = true)]
    pub image: PathBuf,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,

    /// OCR backend
    #[arg(long, value_enum, default_value_t = EngineKind::Auto, env = "IMGTEXT_ENGINE")]
    pub engine: EngineKind,

    /// Recognition language
    #[arg(long, default_value = DEFAULT_LANG, env = "IMGTEXT_LANG")]
    pub lang: String,

    /// Path to the tesseract executable
    #[arg(long, env = "IMGTEXT_TESSERACT_CMD")]
    pub tesseract_cmd: Option<PathBuf>,

    /// Directory containing the ocrs models
    #[arg(long, env = "IMGTEXT_MODELS_DIR")]
    pub models_dir: Option<PathBuf>,
}

impl Cli {
    /// Engine settings taken from the flags.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            engine: self.engine,
            lang: self.lang.clone(),
            tesseract_cmd: self.tesseract_cmd.clone(),
            models_dir: self.models_dir.clone(),
        }
    }
}
