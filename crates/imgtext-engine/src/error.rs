//! Extraction errors.

use std::io;
use std::path::PathBuf;

use imgtext_protocol::ErrorCode;
use thiserror::Error;

/// Message shown to the user when the image file does not exist.
pub const NOT_FOUND_MESSAGE: &str = "Error: Image file not found.";

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("image file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read image: {0}")]
    Io(#[from] io::Error),

    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("{engine} does not support language '{lang}'")]
    UnsupportedLanguage { engine: &'static str, lang: String },

    #[error("OCR engine unavailable: {0}")]
    EngineUnavailable(String),

    #[error("recognition failed: {0}")]
    Recognition(String),
}

impl ExtractError {
    /// Structured code for JSON output.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::NotFound(_) => ErrorCode::FileNotFound,
            Self::Io(_) | Self::Decode(_) => ErrorCode::DecodeFailed,
            Self::UnsupportedLanguage { .. } => ErrorCode::UnsupportedLanguage,
            Self::EngineUnavailable(_) => ErrorCode::EngineUnavailable,
            Self::Recognition(_) => ErrorCode::RecognitionFailed,
        }
    }

    /// The one-line message printed by the CLI in place of extracted text.
    ///
    /// Only a missing file gets a fixed message; everything else is reported
    /// as a generic failure carrying the error's display text.
    pub fn user_message(&self) -> String {
        match self {
            Self::NotFound(_) => NOT_FOUND_MESSAGE.to_string(),
            other => format!("An error occurred: {}", other),
        }
    }
}
