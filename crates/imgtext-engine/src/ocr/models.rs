//! Locating the ocrs model files.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, trace};

pub(crate) const DETECTION_MODEL: &str = "text-detection.rten";
pub(crate) const RECOGNITION_MODEL: &str = "text-recognition.rten";

/// Whether `dir` holds both the detection and recognition models.
pub fn has_models(dir: &Path) -> bool {
    dir.join(DETECTION_MODEL).is_file() && dir.join(RECOGNITION_MODEL).is_file()
}

/// Directories searched for models when none is configured.
///
/// - `bin/../models`, for installs that ship models beside `bin/`
/// - `models/` next to the executable
/// - the ocrs cache directory (`~/.cache/ocrs` on Linux), where the ocrs CLI
///   downloads its models
pub fn candidate_models_dirs() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            if let Some(root) = exe_dir.parent() {
                candidates.push(root.join("models"));
            }
            candidates.push(exe_dir.join("models"));
        }
    }

    if let Some(cache) = dirs::cache_dir() {
        candidates.push(cache.join("ocrs"));
    }

    candidates
}

/// Find the ocrs models directory.
///
/// An explicit directory is used as-is and never falls back to the defaults.
pub fn find_models_dir(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        if has_models(dir) {
            debug!("Using configured models directory {:?}", dir);
            return Ok(dir.to_path_buf());
        }
        anyhow::bail!(
            "Could not find {} and {} in {:?}",
            DETECTION_MODEL,
            RECOGNITION_MODEL,
            dir
        );
    }

    let candidates = candidate_models_dirs();
    for dir in &candidates {
        trace!("Looking for OCR models in {:?}", dir);
        if has_models(dir) {
            debug!("Found models directory at {:?}", dir);
            return Ok(dir.clone());
        }
    }

    let searched = candidates
        .first()
        .context("Failed to compute models directory path")?;
    anyhow::bail!(
        "Could not find OCR models (searched {} locations, starting at {:?})",
        candidates.len(),
        searched
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_explicit_dir_with_models() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(DETECTION_MODEL), b"").unwrap();
        std::fs::write(dir.path().join(RECOGNITION_MODEL), b"").unwrap();

        let found = find_models_dir(Some(dir.path())).unwrap();
        assert_eq!(found, dir.path());
    }

    #[test]
    fn test_explicit_dir_missing_recognition_model() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(DETECTION_MODEL), b"").unwrap();

        assert!(!has_models(dir.path()));
        let err = find_models_dir(Some(dir.path())).unwrap_err();
        assert!(err.to_string().contains(RECOGNITION_MODEL));
    }

    #[test]
    fn test_candidates_include_exe_relative_dirs() {
        let candidates = candidate_models_dirs();
        assert!(candidates.iter().any(|d| d.ends_with("models")));
    }
}
