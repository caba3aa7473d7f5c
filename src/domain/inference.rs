//! Contracts for the external image models.
//!
//! The shapes mirror the JSON returned by hosted object-detection and
//! image-classification endpoints so that adapters can deserialize
//! straight into them.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Pixel-space box reported by the detection model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

impl BoundingBox {
    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectDetection {
    pub label: String,
    pub score: f64,
    #[serde(rename = "box")]
    pub bbox: BoundingBox,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageClassification {
    pub label: String,
    pub score: f64,
}

/// Opaque detection and classification models.
#[async_trait::async_trait]
pub trait InferenceClient: Send + Sync {
    // ---
    /// Run object detection over an encoded image.
    async fn detect_objects(&self, image: &[u8]) -> Result<Vec<ObjectDetection>>;

    /// Run image classification over an encoded image.
    async fn classify(&self, image: &[u8]) -> Result<Vec<ImageClassification>>;
}

/// Type alias for any backend that implements InferenceClient.
pub type InferencePtr = Arc<dyn InferenceClient>;
