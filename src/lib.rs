// src/lib.rs
use anyhow::Result;
use app_state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use tracing_subscriber::EnvFilter;

use handlers::*;

// Public exports (visible outside this module)
pub mod analysis;
pub mod domain;

// Internal-only exports (sibling access within this module)
mod app_state;
mod config;
mod error;
mod handlers;
mod imaging;
mod infrastructure;
mod otp;
mod session;

// Hoist up only the public symbol(s)
pub use error::{ApiError, ErrorResponse};
pub use imaging::{normalize_or_original, CANVAS_SIZE};
pub use session::{create_session, validate_session, SessionInfo};

pub use config::*;

// Publicly expose the infrastructure creation functions
pub use infrastructure::{
    create_huggingface_inference, // ---
    create_log_sms,
    create_memory_repository,
    create_memory_store,
    create_noop_metrics,
    create_offline_inference,
    create_postgres_repository,
    create_prom_metrics,
    create_redis_store,
    create_twilio_sms,
};

/// Build the HTTP router with every backend determined by environment variables.
pub async fn create_router() -> Result<Router> {
    // ---
    // Load all configuration from environment
    let config = AppConfig::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
        .ok(); // Ignores if already initialized

    let metrics = if config.metrics_type == "prom" {
        create_prom_metrics()?
    } else {
        create_noop_metrics()?
    };

    // Create infrastructure dependencies
    let (repository, kv_store) = match &config.store {
        StoreConfig::Persistent { database, redis } => {
            (create_postgres_repository(database).await?, create_redis_store(&redis.url)?)
        }
        StoreConfig::Memory => {
            tracing::warn!("Using in-memory store; nothing survives a restart");
            (create_memory_repository(), create_memory_store())
        }
    };

    let inference = match config.inference.backend.as_str() {
        "huggingface" => create_huggingface_inference(&config.inference)?,
        "offline" => create_offline_inference(),
        other => anyhow::bail!("Unknown SKIN_INFERENCE_TYPE: {other}"),
    };
    let scorer = analysis::create_scorer(&config.inference.scorer)?;

    let sms = match &config.sms {
        SmsConfig::Log => create_log_sms(),
        SmsConfig::Twilio(twilio) => create_twilio_sms(twilio.clone()),
    };

    if config.auth.expose_otp {
        tracing::warn!("SKIN_EXPOSE_OTP is on; one-time codes are echoed to clients");
    }

    // Build application state with all dependencies
    let app_state = AppState::new(
        metrics,
        repository,
        kv_store,
        inference,
        sms,
        scorer,
        config.auth,
    );

    let router = Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .nest(
            "/auth",
            Router::new()
                .route("/send-otp", post(send_otp))
                .route("/verify-otp", post(verify_otp))
                .route("/mark-used", post(mark_used)),
        )
        .route(
            "/analyze-skin",
            post(analyze_skin).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        // Clients may send the image inline as a data URL.
        .route(
            "/store-analysis",
            post(store_analysis).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/history", get(get_history))
        .route("/conditions/{name}", get(get_condition))
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            track_metrics,
        ))
        .with_state(app_state);

    tracing::info!("Router ready");
    Ok(router)
}
