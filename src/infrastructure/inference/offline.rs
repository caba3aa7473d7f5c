use crate::domain::{ImageClassification, InferenceClient, ObjectDetection};
use anyhow::Result;

/// Inference stand-in that detects and classifies nothing.
///
/// Synthesis then falls back to the default face layout with no signals,
/// which keeps development and tests independent of a hosted model.
pub struct OfflineInference;

#[async_trait::async_trait]
impl InferenceClient for OfflineInference {
    async fn detect_objects(&self, _image: &[u8]) -> Result<Vec<ObjectDetection>> {
        Ok(Vec::new())
    }

    async fn classify(&self, _image: &[u8]) -> Result<Vec<ImageClassification>> {
        Ok(Vec::new())
    }
}
