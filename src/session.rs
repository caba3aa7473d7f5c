//! Session management for authenticated users.
//!
//! Provides session token generation and storage in the key-value store with
//! a configurable TTL.

use crate::domain::KeyValueStore;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

// ---

/// Session data stored under `session:{token}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionInfo {
    //
    pub user_id: Uuid,
    pub phone_number: String,
    pub expires_at: i64,
}

// ---

fn session_key(token: &str) -> String {
    format!("session:{token}")
}

/// Creates a new session token and stores it.
///
/// # Arguments
/// * `store` - Key-value store holding sessions
/// * `user_id` - User's unique identifier
/// * `phone_number` - Verified phone number the session is bound to
/// * `ttl` - Session lifetime
///
/// # Returns
/// Opaque session token (UUID)
pub async fn create_session(
    store: &dyn KeyValueStore,
    user_id: Uuid,
    phone_number: &str,
    ttl: Duration,
) -> Result<String> {
    //
    let token = Uuid::new_v4().to_string();
    let expires_at = chrono::Utc::now().timestamp() + ttl.as_secs() as i64;

    let session = SessionInfo {
        //
        user_id,
        phone_number: phone_number.to_string(),
        expires_at,
    };

    store
        .set_ex(&session_key(&token), &serde_json::to_string(&session)?, ttl)
        .await?;

    tracing::info!("Created session for user: {}", user_id);

    Ok(token)
}

// ---

/// Resolves a session token.
///
/// Returns `Ok(None)` when the token is unknown, expired, or unreadable.
/// Storage failures are errors.
pub async fn validate_session(store: &dyn KeyValueStore, token: &str) -> Result<Option<SessionInfo>> {
    //
    let Some(raw) = store.get(&session_key(token)).await? else {
        return Ok(None);
    };

    let session: SessionInfo = match serde_json::from_str(&raw) {
        Ok(session) => session,
        Err(e) => {
            tracing::warn!("Discarding unreadable session record: {}", e);
            return Ok(None);
        }
    };

    // The store's TTL normally removes it first.
    if session.expires_at < chrono::Utc::now().timestamp() {
        return Ok(None);
    }

    Ok(Some(session))
}
