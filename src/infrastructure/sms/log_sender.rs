use crate::domain::SmsSender;
use anyhow::Result;
use std::time::Duration;

/// Development sender: logs instead of dispatching.
pub struct LogSmsSender;

#[async_trait::async_trait]
impl SmsSender for LogSmsSender {
    async fn send_otp(&self, phone_number: &str, code: &str, ttl: Duration) -> Result<()> {
        // ---
        tracing::info!(
            "SMS dispatch disabled; code {code} for {phone_number} valid {}s",
            ttl.as_secs()
        );
        Ok(())
    }
}
