//! # Domain Models
//!
//! These structs represent the core entities of FemWell.
//! Accounts use UUID v7 for time-ordered, globally unique identification.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Confidence above which a scan is labelled "Not Affected".
/// A score exactly at the threshold counts as "Affected".
pub const AFFECTED_THRESHOLD: f32 = 0.5;

/// An accepted upload: sanitized filename plus the raw bytes as received.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    /// Safe to join onto the upload directory; always ends in an allowed extension.
    pub filename: String,
    pub data: Vec<u8>,
}

/// The classifier's verdict for one scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    #[serde(rename = "Affected")]
    Affected,
    #[serde(rename = "Not Affected")]
    NotAffected,
}

impl Verdict {
    pub fn from_confidence(confidence: f32) -> Self {
        if confidence > AFFECTED_THRESHOLD {
            Verdict::NotAffected
        } else {
            Verdict::Affected
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Affected => "Affected",
            Verdict::NotAffected => "Not Affected",
        }
    }

    /// Overlay colour as RGB: red for affected, green otherwise.
    pub fn color(&self) -> [u8; 3] {
        match self {
            Verdict::Affected => [255, 0, 0],
            Verdict::NotAffected => [0, 255, 0],
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Classifier output for a single request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictionResult {
    /// Probability of the "not affected" class, in [0, 1].
    pub confidence: f32,
    pub verdict: Verdict,
}

impl PredictionResult {
    pub fn new(confidence: f32) -> Self {
        Self {
            confidence,
            verdict: Verdict::from_confidence(confidence),
        }
    }
}

/// A registered user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: Uuid,
    pub fullname: String,
    pub email: String,
    /// Unique key of the account store
    pub username: String,
    /// PHC-format hash string; never the plaintext.
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Fields submitted by the registration form.
#[derive(Debug, Clone, Deserialize)]
pub struct Registration {
    pub fullname: String,
    pub email: String,
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

/// Fields submitted by the login form.
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}
