#![allow(dead_code)]

use actix_web::web;
use fw_api::handlers::{AccountState, AppState};
use fw_auth_simple::SimpleAuthProvider;
use fw_core::error::Result;
use fw_core::traits::Classifier;
use fw_db_sqlite::SqliteAccountRepo;
use fw_storage_local::{Annotator, LocalImageStore};
use image::{Rgb, RgbImage};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

pub const BOUNDARY: &str = "femwell-test-boundary";

/// Always answers with the same score, whatever the image.
pub struct FixedClassifier(pub f32);

impl Classifier for FixedClassifier {
    fn confidence(&self, _image_path: &Path) -> Result<f32> {
        Ok(self.0)
    }
}

pub struct Fixture {
    pub dir: TempDir,
    pub state: web::Data<AppState>,
}

impl Fixture {
    pub async fn new(confidence: f32) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalImageStore::new(
            dir.path().join("uploads"),
            dir.path().join("results"),
            "/static/results".into(),
            Annotator::default(),
        );
        store.ensure_dirs().await.unwrap();

        let state = web::Data::new(AppState {
            classifier: Arc::new(FixedClassifier(confidence)),
            store: Box::new(store),
            max_upload_bytes: 1024 * 1024,
        });
        Self { dir, state }
    }

    pub fn uploads(&self) -> PathBuf {
        self.dir.path().join("uploads")
    }

    pub fn results(&self) -> PathBuf {
        self.dir.path().join("results")
    }
}

pub async fn account_state() -> web::Data<AccountState> {
    let repo = SqliteAccountRepo::new("sqlite::memory:").await.unwrap();
    web::Data::new(AccountState {
        repo: Box::new(repo),
        auth: Box::new(SimpleAuthProvider::new()),
    })
}

pub fn png_bytes() -> Vec<u8> {
    let img = RgbImage::from_pixel(320, 240, Rgb([128, 128, 128]));
    let mut out = std::io::Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}

/// Returns (content-type header value, body) for a single-part upload.
pub fn multipart(field: &str, filename: &str, data: &[u8]) -> (String, Vec<u8>) {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n").as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    (format!("multipart/form-data; boundary={BOUNDARY}"), body)
}

/// A single form-data part with no `filename` parameter.
pub fn plain_field(field: &str, value: &[u8]) -> (String, Vec<u8>) {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(format!("Content-Disposition: form-data; name=\"{field}\"\r\n\r\n").as_bytes());
    body.extend_from_slice(value);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    (format!("multipart/form-data; boundary={BOUNDARY}"), body)
}

pub fn file_count(dir: &Path) -> usize {
    std::fs::read_dir(dir).map(|entries| entries.count()).unwrap_or(0)
}
