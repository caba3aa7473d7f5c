// src/config.rs

//! Application configuration loaded from environment variables.
//!
//! This module defines all startup-time configuration for the service.
//! Configuration is validated eagerly and failures are treated as
//! deployment errors rather than recoverable runtime conditions.

use anyhow::Result;
use std::time::Duration;

// ============================================================
// Local macros (config-only, intentionally explicit)
// ============================================================

/// Reads a required environment variable.
///
/// # Behavior
/// - Fails fast if the variable is missing
/// - Produces a clear, human-readable error message
/// - Intended for startup-time configuration validation
macro_rules! required_env {
    // ---
    ($key:literal) => {
        std::env::var($key)
            .map_err(|_| anyhow::anyhow!(concat!("Missing required configuration: ", $key)))?
    };
}

/// Reads an optional environment variable and attempts to parse it.
///
/// If the variable is missing or cannot be parsed, the provided
/// default value is used. Appropriate for non-critical tuning
/// parameters where fallback behavior is acceptable.
macro_rules! optional_env_parse {
    // ---
    ($key:literal, $ty:ty, $default:expr) => {
        std::env::var($key)
            .ok()
            .and_then(|v| v.parse::<$ty>().ok())
            .unwrap_or($default)
    };
}

/// Reads an optional string environment variable with a default.
macro_rules! optional_env {
    // ---
    ($key:literal, $default:expr) => {
        std::env::var($key).unwrap_or_else(|_| $default.to_string())
    };
}

#[cfg(test)]
/// Asserts that a configuration constructor fails due to a missing
/// required environment variable.
macro_rules! assert_missing_config {
    // ---
    ($expr:expr, $key:literal) => {{
        let err = $expr.expect_err("expected configuration error");
        assert!(
            err.to_string()
                .contains(concat!("Missing required configuration: ", $key)),
            "unexpected error: {err}"
        );
    }};
}

// ============================================================
// Public configuration facade
// ============================================================

/// Aggregated application configuration.
///
/// This is the single source of truth for startup configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub store: store::StoreConfig,
    pub auth: auth::AuthConfig,
    pub inference: inference::InferenceConfig,
    pub sms: sms::SmsConfig,
    pub metrics_type: String,
}

impl AppConfig {
    /// Loads and validates all application configuration from the environment.
    ///
    /// # Errors
    /// Returns an error if any required configuration is missing or invalid.
    /// This function is intended to be called exactly once at startup.
    pub fn from_env() -> Result<Self> {
        // ---
        Ok(Self {
            store: store::StoreConfig::from_env()?,
            auth: auth::AuthConfig::from_env(),
            inference: inference::InferenceConfig::from_env()?,
            sms: sms::SmsConfig::from_env()?,
            metrics_type: optional_env!("SKIN_METRICS_TYPE", "noop"),
        })
    }
}

// ============================================================
// Storage configuration
// ============================================================

mod store {
    // ---
    use super::*;

    /// Which persistence backend to run against.
    #[derive(Debug, Clone)]
    pub enum StoreConfig {
        /// Redis for OTPs and sessions, PostgreSQL for users and history.
        Persistent {
            database: DatabaseConfig,
            redis: RedisConfig,
        },
        /// Everything in process memory; for development and tests.
        Memory,
    }

    impl StoreConfig {
        /// Builds a [`StoreConfig`] from `SKIN_STORE_TYPE` (default `persistent`).
        ///
        /// # Errors
        /// Returns an error for an unknown store type, or when the persistent
        /// backend is selected without its connection settings.
        pub fn from_env() -> Result<Self> {
            // ---
            match optional_env!("SKIN_STORE_TYPE", "persistent").as_str() {
                "persistent" => Ok(Self::Persistent {
                    database: DatabaseConfig::from_env()?,
                    redis: RedisConfig::from_env()?,
                }),
                "memory" => Ok(Self::Memory),
                other => anyhow::bail!("Unknown SKIN_STORE_TYPE: {other}"),
            }
        }
    }

    /// Database-related configuration derived from environment variables.
    #[derive(Debug, Clone)]
    pub struct DatabaseConfig {
        /// PostgreSQL connection string.
        pub database_url: String,

        /// Number of attempts when initializing the database connection. Defaults to 50.
        pub retry_count: u32,

        /// Maximum time to wait when acquiring a connection from the pool. Defaults to 30 seconds.
        pub acquire_timeout: Duration,

        /// Minimum number of connections to keep in the pool, even when idle. Defaults to 2.
        pub min_connections: u32,

        /// Maximum number of connections open concurrently. Defaults to 15.
        pub max_connections: u32,
    }

    impl DatabaseConfig {
        /// Builds a [`DatabaseConfig`] from environment variables.
        ///
        /// # Errors
        /// Returns an error if `DATABASE_URL` is missing.
        pub fn from_env() -> Result<Self> {
            // ---
            let database_url = required_env!("DATABASE_URL");
            let retry_count = optional_env_parse!("SKIN_DB_RETRY_COUNT", u32, 50);
            let acquire_timeout_secs = optional_env_parse!("SKIN_DB_ACQUIRE_TIMEOUT_SEC", u64, 30);
            let min_connections = optional_env_parse!("SKIN_DB_MIN_CONNECTIONS", u32, 2);
            let max_connections = optional_env_parse!("SKIN_DB_MAX_CONNECTIONS", u32, 15);

            Ok(Self {
                database_url,
                retry_count,
                acquire_timeout: Duration::from_secs(acquire_timeout_secs),
                min_connections,
                max_connections,
            })
        }
    }

    /// Redis holds the short-lived OTP and session records.
    #[derive(Debug, Clone)]
    pub struct RedisConfig {
        /// Redis connection string.
        pub url: String,
    }

    impl RedisConfig {
        /// Builds a [`RedisConfig`] from environment variables.
        ///
        /// # Errors
        /// Returns an error if `SKIN_REDIS_URL` is missing.
        pub fn from_env() -> Result<Self> {
            // ---
            Ok(Self {
                url: required_env!("SKIN_REDIS_URL"),
            })
        }
    }
}
pub use store::{DatabaseConfig, RedisConfig, StoreConfig};

// ============================================================
// Authentication configuration
// ============================================================

mod auth {
    // ---
    use super::*;

    /// One-time code and session lifetimes, plus the history cap.
    #[derive(Debug, Clone)]
    pub struct AuthConfig {
        /// Lifetime of a one-time code. Defaults to 10 minutes.
        pub otp_ttl: Duration,

        /// Lifetime of a session token. Defaults to 24 hours.
        pub session_ttl: Duration,

        /// Echo the code in the send-otp response. Never enable in production.
        pub expose_otp: bool,

        /// Number of analyses returned by history reads. Defaults to 5.
        pub history_limit: usize,
    }

    impl AuthConfig {
        /// Builds an [`AuthConfig`]; every setting has a default.
        pub fn from_env() -> Self {
            // ---
            let otp_ttl_secs = optional_env_parse!("SKIN_OTP_TTL_SEC", u64, 600);
            let session_ttl_secs = optional_env_parse!("SKIN_SESSION_TTL_SEC", u64, 86_400);

            Self {
                otp_ttl: Duration::from_secs(otp_ttl_secs),
                session_ttl: Duration::from_secs(session_ttl_secs),
                expose_otp: optional_env_parse!("SKIN_EXPOSE_OTP", bool, false),
                history_limit: optional_env_parse!("SKIN_HISTORY_LIMIT", usize, 5),
            }
        }
    }

    impl Default for AuthConfig {
        fn default() -> Self {
            Self {
                otp_ttl: Duration::from_secs(600),
                session_ttl: Duration::from_secs(86_400),
                expose_otp: false,
                history_limit: 5,
            }
        }
    }
}
pub use auth::AuthConfig;

// ============================================================
// Inference configuration
// ============================================================

mod inference {
    // ---
    use super::*;

    /// External model endpoints and the condition scorer choice.
    #[derive(Debug, Clone)]
    pub struct InferenceConfig {
        /// `huggingface` (default) or `offline`.
        pub backend: String,

        /// Required only for the `huggingface` backend.
        pub api_key: Option<String>,

        pub base_url: String,
        pub detection_model: String,
        pub classification_model: String,

        /// `random` (default) or `model`.
        pub scorer: String,
    }

    impl InferenceConfig {
        /// Builds an [`InferenceConfig`] from environment variables.
        ///
        /// # Errors
        /// Returns an error if the `huggingface` backend is selected without
        /// `HUGGING_FACE_API_KEY`.
        pub fn from_env() -> Result<Self> {
            // ---
            let backend = optional_env!("SKIN_INFERENCE_TYPE", "huggingface");
            let api_key = match backend.as_str() {
                "huggingface" => Some(required_env!("HUGGING_FACE_API_KEY")),
                _ => std::env::var("HUGGING_FACE_API_KEY").ok(),
            };

            Ok(Self {
                backend,
                api_key,
                base_url: optional_env!(
                    "SKIN_HF_BASE_URL",
                    "https://api-inference.huggingface.co"
                ),
                detection_model: optional_env!("SKIN_DETECTION_MODEL", "facebook/detr-resnet-50"),
                classification_model: optional_env!(
                    "SKIN_CLASSIFICATION_MODEL",
                    "microsoft/resnet-50"
                ),
                scorer: optional_env!("SKIN_SCORER_TYPE", "random"),
            })
        }
    }
}
pub use inference::InferenceConfig;

// ============================================================
// SMS configuration
// ============================================================

mod sms {
    // ---
    use super::*;

    /// How one-time codes leave the building.
    #[derive(Debug, Clone)]
    pub enum SmsConfig {
        /// Write codes to the log only.
        Log,
        Twilio(TwilioConfig),
    }

    #[derive(Debug, Clone)]
    pub struct TwilioConfig {
        pub account_sid: String,
        pub auth_token: String,
        pub from_phone: String,
    }

    impl SmsConfig {
        /// Builds an [`SmsConfig`] from `SKIN_SMS_TYPE` (default `log`).
        ///
        /// # Errors
        /// Returns an error for an unknown type or missing Twilio credentials.
        pub fn from_env() -> Result<Self> {
            // ---
            match optional_env!("SKIN_SMS_TYPE", "log").as_str() {
                "log" => Ok(Self::Log),
                "twilio" => Ok(Self::Twilio(TwilioConfig {
                    account_sid: required_env!("TWILIO_ACCOUNT_SID"),
                    auth_token: required_env!("TWILIO_AUTH_TOKEN"),
                    from_phone: required_env!("TWILIO_FROM_PHONE"),
                })),
                other => anyhow::bail!("Unknown SKIN_SMS_TYPE: {other}"),
            }
        }
    }
}
pub use sms::{SmsConfig, TwilioConfig};

// ============================================================
// Tests
// ============================================================
