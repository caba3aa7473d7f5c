//! Application state management.
//!
//! This module defines the shared state structure that gets passed to all
//! Axum handlers via the `State` extractor. The `AppState` contains shared
//! resources like the key-value store, the repository, the inference and SMS
//! collaborators, and the metrics implementation.
//!
//! The state is cheaply cloneable (every collaborator is an `Arc<dyn Trait>`)
//! so it can be handed to each request handler without copying resources.

use crate::config::AuthConfig;
use crate::domain::{
    ConditionScorerPtr, InferencePtr, KeyValueStorePtr, MetricsPtr, RepositoryPtr, SmsSenderPtr,
};
use std::time::Duration;

/// Shared application state passed to all Axum handlers.
///
/// This struct serves as the Dependency Injection container for the application.
/// Handlers depend on the domain traits, never on a concrete backend.
///
/// # Lifecycle
///
/// 1. Created once in `create_router()` during application startup
/// 2. Attached to the Axum router via `.with_state(app_state)`
/// 3. Cloned automatically by Axum for each incoming HTTP request
/// 4. Handlers extract via `State(state): State<AppState>`
#[derive(Clone)]
pub(crate) struct AppState {
    /// Metrics implementation for recording application events.
    metrics: MetricsPtr,

    /// Users and analysis history.
    repository: RepositoryPtr,

    /// One-time codes and session tokens, both with expiry.
    kv_store: KeyValueStorePtr,

    /// Face detection and image classification.
    inference: InferencePtr,

    /// One-time code delivery.
    sms: SmsSenderPtr,

    /// Picks a condition and severity per face region.
    scorer: ConditionScorerPtr,

    /// Code and session lifetimes, the OTP echo switch, and the history cap.
    auth: AuthConfig,
}

impl AppState {
    // ---

    pub fn new(
        metrics: MetricsPtr,
        repository: RepositoryPtr,
        kv_store: KeyValueStorePtr,
        inference: InferencePtr,
        sms: SmsSenderPtr,
        scorer: ConditionScorerPtr,
        auth: AuthConfig,
    ) -> Self {
        // ---
        AppState {
            metrics,
            repository,
            kv_store,
            inference,
            sms,
            scorer,
            auth,
        }
    }

    /// Get a reference to the metrics implementation.
    pub(crate) fn metrics(&self) -> &MetricsPtr {
        // ---
        &self.metrics
    }

    /// Get a reference to the repository implementation.
    pub(crate) fn repository(&self) -> &RepositoryPtr {
        // ---
        &self.repository
    }

    pub(crate) fn kv_store(&self) -> &KeyValueStorePtr {
        // ---
        &self.kv_store
    }

    pub(crate) fn inference(&self) -> &InferencePtr {
        // ---
        &self.inference
    }

    pub(crate) fn sms(&self) -> &SmsSenderPtr {
        // ---
        &self.sms
    }

    pub(crate) fn scorer(&self) -> &ConditionScorerPtr {
        // ---
        &self.scorer
    }

    pub(crate) fn otp_ttl(&self) -> Duration {
        // ---
        self.auth.otp_ttl
    }

    pub(crate) fn session_ttl(&self) -> Duration {
        // ---
        self.auth.session_ttl
    }

    /// Whether send-otp echoes the code back (non-production only).
    pub(crate) fn expose_otp(&self) -> bool {
        // ---
        self.auth.expose_otp
    }

    /// Number of analyses returned by history reads.
    pub(crate) fn history_limit(&self) -> usize {
        // ---
        self.auth.history_limit
    }
}
