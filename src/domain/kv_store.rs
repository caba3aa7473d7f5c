use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;

/// Ephemeral key-value storage with per-key expiry.
///
/// Holds one-time codes and session tokens. Values are opaque strings;
/// callers serialize their own records.
#[async_trait::async_trait]
pub trait KeyValueStore: Send + Sync {
    // ---
    /// Store `value` under `key`, replacing any previous value, expiring after `ttl`.
    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> Result<()>;

    /// Fetch the live value under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Round-trip check used by the full health check.
    async fn ping(&self) -> Result<()>;
}

/// Type alias for any backend that implements KeyValueStore.
pub type KeyValueStorePtr = Arc<dyn KeyValueStore>;
