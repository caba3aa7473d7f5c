//! Skin analysis handler.
//!
//! Accepts one uploaded photo, normalizes it, runs it through the detection
//! and classification collaborators, and synthesizes the report.

use crate::analysis;
use crate::app_state::AppState;
use crate::domain::SkinAnalysisData;
use crate::error::ApiError;
use crate::imaging;
use axum::{
    extract::{Multipart, State},
    Json,
};

/// Upload size ceiling for `/analyze-skin`.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// POST /analyze-skin
///
/// Multipart form with a single file field named `image`.
///
/// # Errors
/// - 400 if no non-empty `image` field is present
/// - 500 if either inference call fails
#[tracing::instrument(skip(state, multipart))]
pub async fn analyze_skin(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<SkinAnalysisData>, ApiError> {
    // ---
    let mut image = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Validation(format!("Malformed upload: {e}")))?
    {
        if field.name() == Some("image") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::Validation(format!("Malformed upload: {e}")))?;
            image = Some(bytes);
            break;
        }
    }

    let original = image
        .filter(|bytes| !bytes.is_empty())
        .ok_or_else(|| ApiError::Validation("No image provided".into()))?;

    // Decoding and filtering are CPU-bound; keep them off the async workers.
    let upload = original.clone();
    let prepared = tokio::task::spawn_blocking(move || imaging::normalize_or_original(&upload))
        .await
        .unwrap_or_else(|e| {
            tracing::warn!("Image normalization task failed, using original bytes: {e}");
            original.to_vec()
        });

    let detections = state
        .inference()
        .detect_objects(&prepared)
        .await
        .map_err(ApiError::internal("Failed to process image"))?;

    let classifications = state
        .inference()
        .classify(&prepared)
        .await
        .map_err(ApiError::internal("Failed to process image"))?;

    tracing::debug!(
        detections = detections.len(),
        classifications = classifications.len(),
        "Inference complete"
    );

    let report = analysis::synthesize(&detections, &classifications, state.scorer().as_ref());
    state.metrics().record_analysis_completed();

    Ok(Json(report))
}
