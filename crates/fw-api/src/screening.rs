//! Save → classify → annotate, shared by the JSON and HTML endpoints.

use crate::handlers::AppState;
use actix_web::web;
use fw_core::error::{AppError, Result};
use fw_core::models::{PredictionResult, UploadedImage};

/// Everything a response needs about one screened upload.
#[derive(Debug, Clone)]
pub struct Screening {
    pub prediction: PredictionResult,
    /// Path under which the annotated copy is served, e.g. "/static/results/marked_a.png".
    pub marked_path: String,
}

pub async fn screen(state: &AppState, upload: UploadedImage) -> Result<Screening> {
    let stored = state.store.save_upload(&upload).await?;

    let classifier = state.classifier.clone();
    let image_path = stored.clone();
    let confidence = web::block(move || classifier.confidence(&image_path))
        .await
        .map_err(|e| AppError::Internal(format!("classifier task failed: {e}")))??;

    let prediction = PredictionResult::new(confidence);
    let marked = state.store.annotate(&stored, &prediction).await?;

    log::info!(
        "screened {}: {} ({:.4})",
        upload.filename,
        prediction.verdict,
        prediction.confidence
    );

    Ok(Screening {
        prediction,
        marked_path: state.store.result_url(&marked),
    })
}
