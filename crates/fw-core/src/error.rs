//! # AppError
//!
//! Centralized error handling for the FemWell screening service.
//! Every adapter converts its own failures into one of these variants at the
//! port boundary, so handlers only ever match on `AppError`.

use thiserror::Error;

/// The primary error type for all fw-core operations.
#[derive(Error, Debug)]
pub enum AppError {
    /// The multipart request carried no `file` field.
    #[error("no file uploaded")]
    NoFile,

    /// Empty filename, missing extension or an extension outside the allow-list.
    #[error("invalid file: {0}")]
    InvalidFile(String),

    /// The stored upload could not be read back as an image.
    #[error("could not decode image: {0}")]
    Decode(String),

    /// Registration attempted with a username that is already taken.
    #[error("username already exists: {0}")]
    DuplicateUsername(String),

    /// Registration form `password` and `confirm_password` differ.
    #[error("passwords do not match")]
    PasswordMismatch,

    /// Any other rejected form input (e.g. empty username).
    #[error("validation error: {0}")]
    Validation(String),

    /// Unknown user or wrong password. Deliberately carries no detail.
    #[error("invalid username or password")]
    AuthenticationFailure,

    /// The classifier could not be loaded. Only raised at startup.
    #[error("model load failed: {0}")]
    ModelLoad(String),

    /// Infrastructure failure (e.g. disk full, database down)
    #[error("internal service error: {0}")]
    Internal(String),
}

impl AppError {
    /// Text that is safe to show to the person who made the request.
    pub fn public_message(&self) -> String {
        match self {
            AppError::NoFile => "No file uploaded".to_string(),
            AppError::InvalidFile(_) => "Invalid file type".to_string(),
            AppError::Decode(_) => "The uploaded file could not be read as an image".to_string(),
            AppError::DuplicateUsername(_) => "Username already exists. Choose another.".to_string(),
            AppError::PasswordMismatch => "Passwords do not match!".to_string(),
            AppError::Validation(msg) => msg.clone(),
            AppError::AuthenticationFailure => "Invalid username or password.".to_string(),
            AppError::ModelLoad(_) | AppError::Internal(_) => "Internal server error".to_string(),
        }
    }

    /// True when the request itself was at fault rather than the server.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, AppError::ModelLoad(_) | AppError::Internal(_))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// A specialized Result type for FemWell logic.
pub type Result<T> = std::result::Result<T, AppError>;
