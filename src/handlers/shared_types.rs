use crate::app_state::AppState;
use crate::error::ApiError;
use crate::session::{self, SessionInfo};
use axum::{
    extract::{FromRequest, FromRequestParts, Request},
    http::{header::AUTHORIZATION, request::Parts},
    Json,
};
use serde::{de::DeserializeOwned, Serialize};

/// Wrapper for endpoints whose whole response is a status message.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Authenticated caller, resolved from `Authorization: Bearer <token>`.
///
/// # Errors
///
/// Rejects with 401 if:
/// - Authorization header is missing
/// - Header format is invalid (not "Bearer <token>")
/// - Token is unknown or expired
pub struct AuthSession(pub SessionInfo);

impl FromRequestParts<AppState> for AuthSession {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        // ---
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                tracing::debug!("Missing or malformed Authorization header");
                ApiError::Unauthorized("Unauthorized".into())
            })?;

        session::validate_session(state.kv_store().as_ref(), token)
            .await
            .map_err(ApiError::internal("Failed to validate session"))?
            .map(AuthSession)
            .ok_or_else(|| ApiError::Unauthorized("Invalid or expired session".into()))
    }
}

/// JSON request body whose rejections surface as 400 `{"error": ...}`.
///
/// Covers a missing JSON content type, unparseable bodies, and fields of the
/// wrong type.
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        // ---
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            tracing::debug!("Rejected request body: {}", rejection.body_text());
            ApiError::Validation(rejection.body_text())
        })?;
        Ok(ApiJson(value))
    }
}
