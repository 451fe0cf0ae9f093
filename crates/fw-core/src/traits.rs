//! # Core Traits (Ports)
//!
//! Any plugin must implement these traits to be used by the binary.

use crate::error::Result;
use crate::models::{PredictionResult, UploadedImage, UserAccount};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Binary ultrasound classifier.
///
/// Implementations are loaded once at startup and must be safe to call from
/// several blocking threads at the same time.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait Classifier: Send + Sync {
    /// Returns the confidence that the image stored at `image_path` is not affected.
    fn confidence(&self, image_path: &Path) -> Result<f32>;
}

/// Storage contract for raw uploads and their annotated copies.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Writes the upload under its sanitized filename and returns the stored path.
    /// An existing file with the same name is overwritten.
    async fn save_upload(&self, upload: &UploadedImage) -> Result<PathBuf>;

    /// Writes `marked_<name>` with the verdict overlay and returns its file name.
    async fn annotate(&self, source: &Path, prediction: &PredictionResult) -> Result<String>;

    /// Path component under which an annotated file is served (e.g. "/static/results/x.png").
    fn result_url(&self, file_name: &str) -> String;
}

/// Persistence contract for user accounts.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait AccountRepo: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserAccount>>;

    /// Inserts unconditionally. Callers check for an existing username first.
    async fn insert(&self, account: UserAccount) -> Result<()>;
}

/// Password hashing contract.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Produces a salted hash suitable for storage.
    async fn hash_password(&self, password: &str) -> Result<String>;

    /// Verifies if a provided password matches a stored hash.
    async fn verify_password(&self, password: &str, hash: &str) -> bool;
}
