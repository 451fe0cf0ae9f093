//! # fw-classifier-tract
//!
//! `Classifier` backed by a pure-Rust ONNX runtime. The model is an ONNX
//! export of the binary ultrasound network: NHWC float input of shape
//! (1, 224, 224, 3) scaled to [0, 1], one sigmoid output.

pub mod preprocess;

pub use preprocess::{preprocess_image, INPUT_SIZE};

use fw_core::error::{AppError, Result};
use fw_core::traits::Classifier;
use std::path::Path;
use tract_onnx::prelude::*;

type Plan = SimplePlan<TypedFact, Box<dyn TypedOp>, Graph<TypedFact, Box<dyn TypedOp>>>;

pub struct TractClassifier {
    plan: Plan,
}

impl TractClassifier {
    /// Loads and optimizes the model. Any failure here is fatal for the server.
    pub fn load(model_path: &Path) -> Result<Self> {
        let size = INPUT_SIZE as usize;
        let plan = tract_onnx::onnx()
            .model_for_path(model_path)
            .and_then(|m| m.with_input_fact(0, InferenceFact::dt_shape(f32::datum_type(), tvec!(1, size, size, 3))))
            .and_then(|m| m.into_optimized())
            .and_then(|m| m.into_runnable())
            .map_err(|e| AppError::ModelLoad(format!("{}: {e}", model_path.display())))?;

        log::info!("loaded classifier from {}", model_path.display());
        Ok(Self { plan })
    }

    /// Runs one forward pass on a preprocessed batch and returns the single score.
    pub fn predict(&self, batch: Tensor) -> Result<f32> {
        let outputs = self
            .plan
            .run(tvec!(batch.into()))
            .map_err(|e| AppError::Internal(format!("inference failed: {e}")))?;

        let first = outputs
            .first()
            .ok_or_else(|| AppError::Internal("model produced no outputs".into()))?;
        let scores = first
            .to_array_view::<f32>()
            .map_err(|e| AppError::Internal(format!("unexpected model output: {e}")))?;

        scores
            .iter()
            .next()
            .copied()
            .ok_or_else(|| AppError::Internal("model output is empty".into()))
    }
}

impl Classifier for TractClassifier {
    fn confidence(&self, image_path: &Path) -> Result<f32> {
        let batch = preprocess_image(image_path)?;
        self.predict(batch.into_tensor())
    }
}
