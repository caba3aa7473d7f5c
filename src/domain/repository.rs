use super::models::{AnalysisRecord, User};
use anyhow::Result;
use std::sync::Arc;
use uuid::Uuid;

/// Outcome of the conditional "mark as used" update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkUsed {
    // ---
    /// The flag went from false to true on this call.
    Marked,
    /// The flag was already set; nothing changed.
    AlreadyUsed,
    /// No user with that id.
    NotFound,
}

/// Abstraction for user and analysis-history persistence.
#[async_trait::async_trait]
pub trait Repository: Send + Sync {
    // ---
    /// Return the user owning `phone_number`, creating it with `name` if absent.
    ///
    /// Must be atomic with respect to the unique phone number.
    async fn find_or_create_user(&self, name: &str, phone_number: &str) -> Result<User>;

    /// Get user by phone number.
    async fn get_user_by_phone(&self, phone_number: &str) -> Result<Option<User>>;

    /// Compare-and-swap `has_used_service` from false to true.
    async fn mark_user_used(&self, user_id: Uuid) -> Result<MarkUsed>;

    /// Set `has_used_service` regardless of its current value.
    async fn record_usage(&self, user_id: Uuid) -> Result<()>;

    /// Append an analysis to the owner's history.
    async fn insert_analysis(&self, record: AnalysisRecord) -> Result<()>;

    /// The `limit` most recent analyses for a user, oldest first.
    async fn recent_analyses(&self, user_id: Uuid, limit: usize) -> Result<Vec<AnalysisRecord>>;

    /// Round-trip check used by the full health check.
    async fn ping(&self) -> Result<()>;
}

/// Type alias for any backend that implements Repository.
pub type RepositoryPtr = Arc<dyn Repository>;
