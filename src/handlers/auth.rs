//! Phone-number authentication handlers.
//!
//! Implements the one-time code flow and the single-use policy:
//! 1. `send_otp` - Issue a code and hand it to the SMS collaborator
//! 2. `verify_otp` - Check the code, find or create the user, mint a session
//! 3. `mark_used` - Flip the caller's `hasUsedService` flag exactly once

use super::shared_types::{ApiJson, AuthSession, MessageResponse};
use crate::app_state::AppState;
use crate::domain::{MarkUsed, User};
use crate::error::ApiError;
use crate::{otp, session};
use axum::{extract::State, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendOtpRequest {
    // ---
    pub phone_number: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SendOtpResponse {
    // ---
    pub message: &'static str,
    /// Only present when code echo is switched on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub otp: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpRequest {
    // ---
    pub phone_number: Option<String>,
    pub otp: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct VerifyOtpResponse {
    // ---
    pub message: &'static str,
    pub user: User,
    pub token: String,
}

/// Trimmed, non-empty field value.
fn required(field: Option<String>) -> Option<String> {
    field
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// ============================================================================
// Send OTP Handler
// ============================================================================

/// POST /auth/send-otp
///
/// # Request Body
/// ```json
/// { "phoneNumber": "+14155550123" }
/// ```
///
/// # Errors
/// - 400 if the phone number is missing or not E.164
/// - 403 if the phone number has already used the service
#[tracing::instrument(skip(state, req))]
pub async fn send_otp(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<SendOtpRequest>,
) -> Result<Json<SendOtpResponse>, ApiError> {
    // ---
    let phone_number = required(req.phone_number)
        .filter(|p| otp::is_valid_phone(p))
        .ok_or_else(|| {
            ApiError::Validation(
                "Invalid phone number. Please use international format (e.g., +1234567890)"
                    .into(),
            )
        })?;

    let existing = state
        .repository()
        .get_user_by_phone(&phone_number)
        .await
        .map_err(ApiError::internal("Failed to send OTP"))?;

    if existing.is_some_and(|u| u.has_used_service) {
        return Err(ApiError::Forbidden(
            "This phone number has already been used for skin analysis. \
             Each number can only be used once."
                .into(),
        ));
    }

    let record = otp::issue(
        state.kv_store().as_ref(),
        &phone_number,
        state.otp_ttl(),
        Utc::now(),
    )
    .await
    .map_err(ApiError::internal("Failed to send OTP"))?;

    state
        .sms()
        .send_otp(&phone_number, &record.otp, state.otp_ttl())
        .await
        .map_err(ApiError::internal("Failed to send OTP"))?;

    state.metrics().record_otp_sent();
    tracing::info!("OTP issued");

    Ok(Json(SendOtpResponse {
        message: "OTP sent successfully",
        otp: state.expose_otp().then_some(record.otp),
    }))
}

// ============================================================================
// Verify OTP Handler
// ============================================================================

/// POST /auth/verify-otp
///
/// # Request Body
/// ```json
/// { "phoneNumber": "+14155550123", "otp": "123456", "name": "Ada" }
/// ```
///
/// On success the user record is created if absent, and a fresh session
/// token is returned.
#[tracing::instrument(skip(state, req))]
pub async fn verify_otp(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<VerifyOtpRequest>,
) -> Result<Json<VerifyOtpResponse>, ApiError> {
    // ---
    let (Some(phone_number), Some(code), Some(name)) =
        (required(req.phone_number), required(req.otp), required(req.name))
    else {
        return Err(ApiError::Validation(
            "Phone number, OTP, and name are required".into(),
        ));
    };

    otp::verify(
        state.kv_store().as_ref(),
        &phone_number,
        &code,
        state.otp_ttl(),
        Utc::now(),
    )
    .await?;

    let user = state
        .repository()
        .find_or_create_user(&name, &phone_number)
        .await
        .map_err(ApiError::internal("Failed to verify OTP"))?;

    let token = session::create_session(
        state.kv_store().as_ref(),
        user.id,
        &phone_number,
        state.session_ttl(),
    )
    .await
    .map_err(ApiError::internal("Failed to verify OTP"))?;

    state.metrics().record_otp_verified();

    Ok(Json(VerifyOtpResponse {
        message: "OTP verified successfully",
        user,
        token,
    }))
}

// ============================================================================
// Mark Used Handler
// ============================================================================

/// POST /auth/mark-used
///
/// Requires `Authorization: Bearer <token>`.
///
/// # Errors
/// - 401 for a missing or expired session
/// - 404 if the session's user no longer exists
/// - 403 if the user has already used the service
#[tracing::instrument(skip(state, session))]
pub async fn mark_used(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
) -> Result<Json<MessageResponse>, ApiError> {
    // ---
    let outcome = state
        .repository()
        .mark_user_used(session.user_id)
        .await
        .map_err(ApiError::internal("Failed to update user"))?;

    match outcome {
        MarkUsed::Marked => {
            tracing::info!("User {} marked as used", session.user_id);
            Ok(Json(MessageResponse {
                message: "User marked as having used the service",
            }))
        }
        MarkUsed::AlreadyUsed => Err(ApiError::Forbidden(
            "User has already used the service".into(),
        )),
        MarkUsed::NotFound => Err(ApiError::NotFound("User not found".into())),
    }
}
