//! Output formatting for extraction results.

use imgtext_engine::ExtractError;
use imgtext_protocol::{ExtractionReport, Response};

/// Output formatter.
pub struct Output {
    json: bool,
}

impl Output {
    /// Create a new output formatter.
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    /// Render a successful extraction.
    pub fn render_report(&self, report: ExtractionReport) -> anyhow::Result<String> {
        if self.json {
            Ok(serde_json::to_string(&Response::success(report))?)
        } else {
            Ok(report.text)
        }
    }

    /// Render a failed extraction.
    ///
    /// Plain mode prints the user-facing message in place of the text.
    pub fn render_error(&self, error: &ExtractError) -> anyhow::Result<String> {
        if self.json {
            let response = Response::error(error.code(), error.user_message());
            Ok(serde_json::to_string(&response)?)
        } else {
            Ok(error.user_message())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn report(text: &str) -> ExtractionReport {
        ExtractionReport {
            path: "scan.png".to_string(),
            engine: "tesseract".to_string(),
            lang: "eng".to_string(),
            width: 10,
            height: 10,
            text: text.to_string(),
            lines: Vec::new(),
        }
    }

    #[test]
    fn test_plain_report_is_raw_text() {
        let out = Output::new(false).render_report(report("Hello\n")).unwrap();
        assert_eq!(out, "Hello\n");
    }

    #[test]
    fn test_plain_not_found() {
        let err = ExtractError::NotFound(PathBuf::from("gone.png"));
        let out = Output::new(false).render_error(&err).unwrap();
        assert_eq!(out, "Error: Image file not found.");
    }

    #[test]
    fn test_json_error() {
        let err = ExtractError::Recognition("boom".to_string());
        let out = Output::new(true).render_error(&err).unwrap();

        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["error"]["code"], "recognition_failed");
        assert_eq!(
            value["error"]["message"],
            "An error occurred: recognition failed: boom"
        );
    }

    #[test]
    fn test_json_report() {
        let out = Output::new(true).render_report(report("Hi")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["data"]["text"], "Hi");
        assert_eq!(value["data"]["engine"], "tesseract");
    }
}
