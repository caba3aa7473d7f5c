//! Hosted Hugging Face inference API adapter.
//!
//! Both tasks POST the raw image bytes to `{base_url}/models/{model}` with a
//! bearer key and deserialize the JSON array that comes back.

use crate::domain::{ImageClassification, InferenceClient, ObjectDetection};
use anyhow::{Context, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Per-request ceiling; model cold starts can take a while.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

pub struct HuggingFaceClient {
    // ---
    client: Client,
    base_url: String,
    api_key: String,
    detection_model: String,
    classification_model: String,
}

impl HuggingFaceClient {
    // ---
    pub fn new(
        base_url: String,
        api_key: String,
        detection_model: String,
        classification_model: String,
    ) -> Result<Self> {
        // ---
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            detection_model,
            classification_model,
        })
    }

    fn model_url(&self, model: &str) -> String {
        format!("{}/models/{}", self.base_url, model)
    }

    async fn run<T: DeserializeOwned>(&self, model: &str, image: &[u8]) -> Result<T> {
        // ---
        let response = self
            .client
            .post(self.model_url(model))
            .bearer_auth(&self.api_key)
            .header("content-type", "application/octet-stream")
            .body(image.to_vec())
            .send()
            .await
            .with_context(|| format!("call model {model}"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::error!("Model {model} returned {status}: {body}");
            anyhow::bail!("model {model} returned {status}");
        }

        response
            .json::<T>()
            .await
            .with_context(|| format!("decode response from model {model}"))
    }
}

#[async_trait::async_trait]
impl InferenceClient for HuggingFaceClient {
    // ---
    async fn detect_objects(&self, image: &[u8]) -> Result<Vec<ObjectDetection>> {
        self.run(&self.detection_model, image).await
    }

    async fn classify(&self, image: &[u8]) -> Result<Vec<ImageClassification>> {
        self.run(&self.classification_model, image).await
    }
}
