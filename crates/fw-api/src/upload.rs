//! Extraction of the `file` part from a multipart request.

use actix_multipart::Multipart;
use fw_core::error::{AppError, Result};
use fw_core::intake;
use fw_core::models::UploadedImage;
use futures_util::TryStreamExt;

/// Name of the multipart field carrying the scan.
pub const FILE_FIELD: &str = "file";

/// Reads the first `file` part and runs it through intake validation.
///
/// Nothing is written to disk here; a rejected upload never reaches the store.
pub async fn read_upload(mut payload: Multipart, max_bytes: usize) -> Result<UploadedImage> {
    while let Some(mut field) = payload.try_next().await.map_err(malformed)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        // A part without a filename parameter is a plain form value, not a file.
        let Some(filename) = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_string)
        else {
            return Err(AppError::NoFile);
        };

        // Check the name before buffering the body.
        if filename.is_empty() || !intake::allowed_file(&filename) {
            return Err(AppError::InvalidFile(filename));
        }

        let mut data = Vec::new();
        while let Some(chunk) = field.try_next().await.map_err(malformed)? {
            if data.len() + chunk.len() > max_bytes {
                return Err(AppError::Validation(format!(
                    "Upload exceeds the {} MiB limit",
                    max_bytes / (1024 * 1024)
                )));
            }
            data.extend_from_slice(&chunk);
        }

        return intake::accept_upload(&filename, data);
    }

    Err(AppError::NoFile)
}

fn malformed(err: actix_multipart::MultipartError) -> AppError {
    log::debug!("unreadable multipart body: {err}");
    AppError::NoFile
}
