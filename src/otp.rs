//! One-time code issuance and verification.
//!
//! Codes live in the key-value store under `otp:{phone}` as a JSON
//! [`OtpRecord`]. A verified record is kept around for one more OTP lifetime
//! so a replay is reported as "already verified" rather than "not found".

use crate::domain::KeyValueStore;
use crate::error::ApiError;
use anyhow::Result;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// E.164: leading `+`, no leading zero, at most 15 digits.
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+[1-9]\d{1,14}$").expect("phone regex is valid"));

/// Stored state of an issued code.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpRecord {
    pub phone_number: String,
    pub otp: String,
    pub expires_at: DateTime<Utc>,
    pub verified: bool,
}

pub fn is_valid_phone(phone_number: &str) -> bool {
    PHONE_RE.is_match(phone_number)
}

/// Uniformly random six-digit code.
pub fn generate_code() -> String {
    // ---
    rand::thread_rng().gen_range(100_000..1_000_000).to_string()
}

fn otp_key(phone_number: &str) -> String {
    format!("otp:{phone_number}")
}

/// Store a fresh code for `phone_number`, replacing any outstanding one.
pub async fn issue(
    store: &dyn KeyValueStore,
    phone_number: &str,
    ttl: Duration,
    now: DateTime<Utc>,
) -> Result<OtpRecord> {
    // ---
    let record = OtpRecord {
        phone_number: phone_number.to_string(),
        otp: generate_code(),
        expires_at: now + chrono::Duration::from_std(ttl)?,
        verified: false,
    };

    store
        .set_ex(&otp_key(phone_number), &serde_json::to_string(&record)?, ttl)
        .await?;

    Ok(record)
}

/// Check `code` against the stored record and mark it verified.
///
/// Rejections are [`ApiError::InvalidOtp`]; storage failures are internal.
pub async fn verify(
    store: &dyn KeyValueStore,
    phone_number: &str,
    code: &str,
    ttl: Duration,
    now: DateTime<Utc>,
) -> Result<(), ApiError> {
    // ---
    let key = otp_key(phone_number);
    let raw = store
        .get(&key)
        .await
        .map_err(ApiError::internal("Failed to verify OTP"))?
        .ok_or_else(|| ApiError::InvalidOtp("OTP expired or not found".into()))?;

    let mut record: OtpRecord = serde_json::from_str(&raw)
        .map_err(|e| ApiError::internal("Failed to verify OTP")(e.into()))?;

    if record.verified {
        return Err(ApiError::InvalidOtp("OTP already verified".into()));
    }
    if now > record.expires_at {
        return Err(ApiError::InvalidOtp("OTP expired".into()));
    }
    if record.otp != code {
        return Err(ApiError::InvalidOtp("Invalid OTP".into()));
    }

    // Not atomic with the read above; two racing verifies can both pass.
    record.verified = true;
    let json = serde_json::to_string(&record)
        .map_err(|e| ApiError::internal("Failed to verify OTP")(e.into()))?;
    store
        .set_ex(&key, &json, ttl)
        .await
        .map_err(ApiError::internal("Failed to verify OTP"))?;

    Ok(())
}
