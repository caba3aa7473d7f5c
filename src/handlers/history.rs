//! Per-user analysis history.
//!
//! `store_analysis` appends to the caller's history; `get_history` returns the
//! most recent entries (oldest first) with a progress summary over them.

use super::shared_types::{ApiJson, AuthSession};
use crate::analysis::{self, ProgressPoint, ProgressSummary};
use crate::app_state::AppState;
use crate::domain::AnalysisRecord;
use crate::error::ApiError;
use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreAnalysisRequest {
    // ---
    pub image_url: Option<String>,
    pub analysis_data: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreAnalysisResponse {
    // ---
    pub message: &'static str,
    pub analysis_id: Uuid,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    // ---
    pub id: Uuid,
    pub image_url: String,
    pub analysis_data: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    // ---
    pub entries: Vec<HistoryEntry>,
    pub progress: ProgressSummary,
}

// ============================================================================
// Store Analysis Handler
// ============================================================================

/// POST /store-analysis
///
/// Requires `Authorization: Bearer <token>`.
///
/// # Request Body
/// ```json
/// { "imageUrl": "data:image/png;base64,...", "analysisData": { ... } }
/// ```
///
/// Also flags the caller as having used the service.
#[tracing::instrument(skip(state, session, req))]
pub async fn store_analysis(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    ApiJson(req): ApiJson<StoreAnalysisRequest>,
) -> Result<Json<StoreAnalysisResponse>, ApiError> {
    // ---
    let image_url = req.image_url.filter(|url| !url.trim().is_empty());
    let analysis_data = req.analysis_data.filter(|data| !data.is_null());

    let (Some(image_url), Some(analysis_data)) = (image_url, analysis_data) else {
        return Err(ApiError::Validation(
            "Image URL and analysis data are required".into(),
        ));
    };

    let record = AnalysisRecord::new(session.user_id, image_url, analysis_data.to_string());
    let analysis_id = record.id;

    state
        .repository()
        .insert_analysis(record)
        .await
        .map_err(ApiError::internal("Failed to store analysis"))?;

    state
        .repository()
        .record_usage(session.user_id)
        .await
        .map_err(ApiError::internal("Failed to store analysis"))?;

    state.metrics().record_analysis_stored();
    tracing::info!("Stored analysis {} for user {}", analysis_id, session.user_id);

    Ok(Json(StoreAnalysisResponse {
        message: "Analysis stored successfully",
        analysis_id,
    }))
}

// ============================================================================
// History Handler
// ============================================================================

/// GET /history
///
/// Requires `Authorization: Bearer <token>`. Entries whose stored data has no
/// numeric `overallScore` are still listed but left out of the progress summary.
#[tracing::instrument(skip(state, session))]
pub async fn get_history(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
) -> Result<Json<HistoryResponse>, ApiError> {
    // ---
    let records = state
        .repository()
        .recent_analyses(session.user_id, state.history_limit())
        .await
        .map_err(ApiError::internal("Failed to load history"))?;

    let mut points: Vec<ProgressPoint> = Vec::with_capacity(records.len());
    let mut entries = Vec::with_capacity(records.len());

    for record in records {
        let analysis_data: serde_json::Value =
            serde_json::from_str(&record.analysis_data).unwrap_or_else(|e| {
                tracing::warn!("Analysis {} holds invalid JSON: {}", record.id, e);
                serde_json::Value::Null
            });

        if let Ok(point) = ProgressPoint::deserialize(&analysis_data) {
            points.push(point);
        }

        entries.push(HistoryEntry {
            id: record.id,
            image_url: record.image_ref,
            analysis_data,
            created_at: record.created_at,
        });
    }

    Ok(Json(HistoryResponse {
        entries,
        progress: analysis::summarize(&points),
    }))
}
