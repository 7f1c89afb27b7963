//! Viewer state, independent of the UI toolkit.

use std::path::{Path, PathBuf};

use imgtext_engine::{has_supported_extension, load_image, Extractor, SUPPORTED_EXTENSIONS};
use tracing::{debug, warn};

/// Shown in the text pane when recognition finds nothing.
pub const NO_TEXT_PLACEHOLDER: &str = "No text could be extracted.";

/// Shown in the text pane while recognition runs.
pub const PROCESSING_MESSAGE: &str = "Processing...";

/// Largest preview side in pixels; bigger images are thumbnailed.
const MAX_PREVIEW_SIDE: u32 = 2048;

/// RGBA pixels for the preview pane.
pub struct Preview {
    /// Width and height in pixels.
    pub size: [usize; 2],
    /// Unmultiplied RGBA bytes, row-major.
    pub rgba: Vec<u8>,
    /// Bumped every time a new image is opened.
    pub generation: u64,
}

/// Everything the window shows.
///
/// Holds one image path slot. Extraction is only possible once an image is
/// loaded, and opening another image replaces the preview and clears the
/// text from the previous one.
pub struct ViewerState {
    image_path: Option<PathBuf>,
    preview: Option<Preview>,
    output: String,
    status: String,
    processing: bool,
    error: Option<String>,
    generation: u64,
}

impl Default for ViewerState {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewerState {
    pub fn new() -> Self {
        Self {
            image_path: None,
            preview: None,
            output: String::new(),
            status: "Open an image to begin.".to_string(),
            processing: false,
            error: None,
            generation: 0,
        }
    }

    /// Decode `path` for preview and make it the current image.
    ///
    /// Only the extensions offered by the open dialog are accepted. On
    /// failure the previous image stays loaded and an error is queued.
    /// Ignored while an extraction is in flight.
    pub fn open(&mut self, path: PathBuf) -> bool {
        if !self.can_open() {
            debug!("Ignoring open of {:?} during extraction", path);
            return false;
        }

        if !has_supported_extension(&path) {
            self.error = Some(format!(
                "Unsupported file type. Choose one of: {}",
                SUPPORTED_EXTENSIONS.join(", ")
            ));
            return false;
        }

        let image = match load_image(&path) {
            Ok(image) => image,
            Err(e) => {
                warn!("Failed to open {:?}: {}", path, e);
                self.error = Some(format!("Failed to open image: {}", e.user_message()));
                return false;
            }
        };

        let (width, height) = (image.width(), image.height());
        let image = if width > MAX_PREVIEW_SIDE || height > MAX_PREVIEW_SIDE {
            image.thumbnail(MAX_PREVIEW_SIDE, MAX_PREVIEW_SIDE)
        } else {
            image
        };
        let rgba = image.to_rgba8();

        self.generation += 1;
        self.preview = Some(Preview {
            size: [rgba.width() as usize, rgba.height() as usize],
            rgba: rgba.into_raw(),
            generation: self.generation,
        });

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        self.status = format!("Loaded {} ({}x{})", name, width, height);
        debug!("{}", self.status);

        self.output.clear();
        self.image_path = Some(path);
        true
    }

    /// Whether the open action is enabled.
    pub fn can_open(&self) -> bool {
        !self.processing
    }

    /// Whether the extract action is enabled.
    pub fn can_extract(&self) -> bool {
        self.image_path.is_some() && !self.processing
    }

    /// Show the processing message. Returns false if extraction is disabled.
    pub fn begin_extract(&mut self) -> bool {
        if !self.can_extract() {
            return false;
        }
        self.processing = true;
        self.output = PROCESSING_MESSAGE.to_string();
        self.status = "Extracting text...".to_string();
        true
    }

    /// Re-open the current image and run it through `extractor`.
    ///
    /// Blocks until the engine returns.
    pub fn finish_extract(&mut self, extractor: &Extractor) {
        self.processing = false;
        let Some(path) = self.image_path.clone() else {
            return;
        };

        match extractor.extract(&path) {
            Ok(report) => {
                self.output = if report.is_blank() {
                    NO_TEXT_PLACEHOLDER.to_string()
                } else {
                    report.text.trim_end().to_string()
                };
                self.status = format!(
                    "Extracted {} line(s) with {}",
                    report.lines.len(),
                    report.engine
                );
            }
            Err(e) => {
                warn!("Extraction failed for {:?}: {}", path, e);
                self.output.clear();
                self.status = "Extraction failed.".to_string();
                self.error = Some(e.user_message());
            }
        }
    }

    /// Take the pending error, if any, for display in a dialog.
    pub fn take_error(&mut self) -> Option<String> {
        self.error.take()
    }

    pub fn image_path(&self) -> Option<&Path> {
        self.image_path.as_deref()
    }

    pub fn preview(&self) -> Option<&Preview> {
        self.preview.as_ref()
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn is_processing(&self) -> bool {
        self.processing
    }
}
