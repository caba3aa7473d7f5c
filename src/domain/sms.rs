use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;

/// Out-of-band delivery of one-time codes.
#[async_trait::async_trait]
pub trait SmsSender: Send + Sync {
    // ---
    /// Deliver `code` to `phone_number`, telling the recipient it is valid for `ttl`.
    async fn send_otp(&self, phone_number: &str, code: &str, ttl: Duration) -> Result<()>;
}

/// Type alias for any backend that implements SmsSender.
pub type SmsSenderPtr = Arc<dyn SmsSender>;
