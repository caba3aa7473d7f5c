mod huggingface;
mod offline;

pub use huggingface::HuggingFaceClient;
pub use offline::OfflineInference;

use crate::config::InferenceConfig;
use crate::domain::InferencePtr;
use anyhow::Result;
use std::sync::Arc;

/// Creates the Hugging Face inference client from configuration.
pub fn create_huggingface_inference(config: &InferenceConfig) -> Result<InferencePtr> {
    // ---
    let api_key = config
        .api_key
        .clone()
        .ok_or_else(|| anyhow::anyhow!("Missing required configuration: HUGGING_FACE_API_KEY"))?;

    Ok(Arc::new(HuggingFaceClient::new(
        config.base_url.clone(),
        api_key,
        config.detection_model.clone(),
        config.classification_model.clone(),
    )?))
}

/// Creates an inference backend that never leaves the process.
pub fn create_offline_inference() -> InferencePtr {
    Arc::new(OfflineInference)
}
