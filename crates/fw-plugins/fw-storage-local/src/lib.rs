//! # fw-storage-local
//! femwell/crates/fw-plugins/fw-storage-local/src/lib.rs
//! Local filesystem implementation of `ImageStore`.
//! Uploads keep their sanitized name; annotated copies go to a sibling results directory.

pub mod annotate;

pub use annotate::Annotator;

use async_trait::async_trait;
use fw_core::error::{AppError, Result};
use fw_core::models::{PredictionResult, UploadedImage};
use fw_core::traits::ImageStore;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Prefix of every annotated file name.
pub const MARKED_PREFIX: &str = "marked_";

pub struct LocalImageStore {
    /// Directory for raw uploads (e.g., "./static/uploads")
    upload_dir: PathBuf,
    /// Directory for annotated copies (e.g., "./static/results")
    results_dir: PathBuf,
    /// Public URL prefix of `results_dir` (e.g., "/static/results")
    results_url_prefix: String,
    annotator: Annotator,
}

impl LocalImageStore {
    pub fn new(upload_dir: PathBuf, results_dir: PathBuf, results_url_prefix: String, annotator: Annotator) -> Self {
        Self {
            upload_dir,
            results_dir,
            results_url_prefix: results_url_prefix.trim_end_matches('/').to_string(),
            annotator,
        }
    }

    /// Creates both directories if they do not exist yet.
    pub async fn ensure_dirs(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.upload_dir).await?;
        fs::create_dir_all(&self.results_dir).await
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    pub fn results_dir(&self) -> &Path {
        &self.results_dir
    }
}

/// `marked_<basename of source>`
pub fn marked_name(source: &Path) -> Result<String> {
    source
        .file_name()
        .and_then(|n| n.to_str())
        .map(|n| format!("{MARKED_PREFIX}{n}"))
        .ok_or_else(|| AppError::Internal(format!("no file name in {}", source.display())))
}

#[async_trait]
impl ImageStore for LocalImageStore {
    async fn save_upload(&self, upload: &UploadedImage) -> Result<PathBuf> {
        let target = self.upload_dir.join(&upload.filename);
        fs::write(&target, &upload.data).await?;
        log::debug!("stored upload {} ({} bytes)", target.display(), upload.data.len());
        Ok(target)
    }

    async fn annotate(&self, source: &Path, prediction: &PredictionResult) -> Result<String> {
        let name = marked_name(source)?;
        let target = self.results_dir.join(&name);
        let source = source.to_path_buf();
        let annotator = self.annotator.clone();
        let verdict = prediction.verdict;

        tokio::task::spawn_blocking(move || annotator.mark_file(&source, &target, verdict))
            .await
            .map_err(|e| AppError::Internal(format!("annotation task failed: {e}")))??;

        Ok(name)
    }

    fn result_url(&self, file_name: &str) -> String {
        format!("{}/{}", self.results_url_prefix, file_name)
    }
}
