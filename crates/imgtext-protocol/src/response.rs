//! Response envelope printed by the CLI in JSON mode.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ExtractionReport;

/// Outcome of one extraction request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    /// Whether the extraction succeeded.
    pub success: bool,

    /// Report on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ExtractionReport>,

    /// Error details on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
}

impl Response {
    /// Create a successful response.
    pub fn success(report: ExtractionReport) -> Self {
        Self {
            success: true,
            data: Some(report),
            error: None,
        }
    }

    /// Create an error response.
    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ErrorInfo {
                code,
                message: message.into(),
            }),
        }
    }
}

/// Error information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Error code.
    pub code: ErrorCode,
    /// Human-readable error message.
    pub message: String,
}

/// Error codes for structured error handling.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Error)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The image file does not exist.
    #[error("file not found")]
    FileNotFound,

    /// The file could not be read or decoded as an image.
    #[error("decode failed")]
    DecodeFailed,

    /// The backend does not support the requested language.
    #[error("unsupported language")]
    UnsupportedLanguage,

    /// The OCR engine could not be started.
    #[error("engine unavailable")]
    EngineUnavailable,

    /// The OCR engine ran but failed.
    #[error("recognition failed")]
    RecognitionFailed,
}
