//! Backend driving an external tesseract executable.

use std::io::{Cursor, ErrorKind, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};

use image::{DynamicImage, ImageFormat};
use tracing::{debug, trace};

use super::{OcrBackend, Recognition};
use crate::error::ExtractError;

const ENGINE_NAME: &str = "tesseract";

/// Executable looked up on PATH when no command is configured.
pub const DEFAULT_TESSERACT_CMD: &str = "tesseract";

/// Runs `tesseract stdin stdout -l <lang>`, feeding the bitmap as PNG.
pub struct TesseractBackend {
    command: PathBuf,
}

impl TesseractBackend {
    /// Create a backend using `command`, or `tesseract` on PATH.
    pub fn new(command: Option<PathBuf>) -> Self {
        let command = command.unwrap_or_else(|| PathBuf::from(DEFAULT_TESSERACT_CMD));
        Self { command }
    }

    /// The executable this backend runs.
    pub fn command(&self) -> &PathBuf {
        &self.command
    }
}

impl OcrBackend for TesseractBackend {
    fn name(&self) -> &'static str {
        ENGINE_NAME
    }

    fn recognize(&self, image: &DynamicImage, lang: &str) -> Result<Recognition, ExtractError> {
        let mut png = Cursor::new(Vec::new());
        image
            .write_to(&mut png, ImageFormat::Png)
            .map_err(|e| ExtractError::Recognition(format!("failed to encode image: {}", e)))?;
        let png = png.into_inner();

        debug!("Running {:?} (lang={}, {} bytes)", self.command, lang, png.len());
        let mut child = Command::new(&self.command)
            .args(["stdin", "stdout", "-l", lang])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                if e.kind() == ErrorKind::NotFound {
                    ExtractError::EngineUnavailable(format!(
                        "{} is not installed or it's not in your PATH",
                        self.command.display()
                    ))
                } else {
                    ExtractError::EngineUnavailable(format!(
                        "failed to start {}: {}",
                        self.command.display(),
                        e
                    ))
                }
            })?;

        // A write error usually means the child exited early; its status and
        // stderr say why, so check those first.
        let write_result = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(&png),
            None => Ok(()),
        };

        let output = child
            .wait_with_output()
            .map_err(|e| ExtractError::Recognition(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stderr = stderr.trim();
            return Err(ExtractError::Recognition(if stderr.is_empty() {
                format!("{} exited with {}", ENGINE_NAME, output.status)
            } else {
                stderr.to_string()
            }));
        }

        write_result.map_err(|e| {
            ExtractError::Recognition(format!("failed to send image to {}: {}", ENGINE_NAME, e))
        })?;

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        trace!("tesseract returned {} bytes", text.len());

        Ok(Recognition::from_text(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Luma};

    fn blank_image(value: u8) -> DynamicImage {
        DynamicImage::ImageLuma8(ImageBuffer::from_pixel(100, 100, Luma([value])))
    }

    #[test]
    fn test_default_command() {
        let backend = TesseractBackend::new(None);
        assert_eq!(backend.command(), &PathBuf::from("tesseract"));
    }

    #[test]
    fn test_missing_executable_is_unavailable() {
        let backend = TesseractBackend::new(Some(PathBuf::from(
            "/nonexistent/imgtext-test/tesseract",
        )));

        match backend.recognize(&blank_image(255), "eng") {
            Err(ExtractError::EngineUnavailable(msg)) => {
                assert!(msg.contains("not installed"));
            }
            other => panic!("Expected EngineUnavailable, got {:?}", other),
        }
    }

    /// All child-process cases live in one test so a script is never
    /// executed while another test thread still holds it open for writing.
    #[cfg(unix)]
    #[test]
    fn test_fake_tesseract_scripts() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::TempDir::new().unwrap();
        let write_script = |name: &str, body: &str| {
            let path = dir.path().join(name);
            std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
            path
        };

        let ok = write_script(
            "ok.sh",
            "cat > /dev/null\nprintf 'HELLO WORLD\\n\\nsecond line\\n'",
        );
        let failing = write_script(
            "fail.sh",
            "cat > /dev/null\necho \"Failed loading language '$4'\" >&2\nexit 1",
        );

        let rec = TesseractBackend::new(Some(ok))
            .recognize(&blank_image(255), "eng")
            .unwrap();
        assert!(rec.text.contains("HELLO WORLD"));
        assert_eq!(rec.lines.len(), 2);

        match TesseractBackend::new(Some(failing)).recognize(&blank_image(255), "xyz") {
            Err(ExtractError::Recognition(msg)) => {
                assert_eq!(msg, "Failed loading language 'xyz'");
            }
            other => panic!("Expected Recognition error, got {:?}", other),
        }
    }

    #[test]
    #[ignore = "requires tesseract on PATH"]
    fn test_known_text_is_recognized() {
        let image = crate::ocr::fixtures::render_text("HELLO WORLD");
        let rec = TesseractBackend::new(None).recognize(&image, "eng").unwrap();
        assert!(rec.text.to_uppercase().contains("HELLO"));
    }

    #[test]
    #[ignore = "requires tesseract on PATH"]
    fn test_blank_image_yields_no_text() {
        let rec = TesseractBackend::new(None)
            .recognize(&blank_image(255), "eng")
            .unwrap();
        assert!(rec.text.trim().is_empty());
    }
}
