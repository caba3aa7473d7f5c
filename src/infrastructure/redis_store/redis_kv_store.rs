use crate::domain::KeyValueStore;
use anyhow::{Context, Result};
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, Client};
use std::time::Duration;

/// Key-value store on Redis `SET EX` / `GET`.
pub struct RedisKeyValueStore {
    // ---
    client: Client,
}

impl RedisKeyValueStore {
    // ---
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Creates a new multiplexed Redis connection.
    async fn get_conn(&self) -> Result<MultiplexedConnection> {
        // ---
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|err| {
                tracing::error!("Failed to connect to Redis: {:?}", err);
                err
            })
            .context("connect to Redis")
    }
}

#[async_trait::async_trait]
impl KeyValueStore for RedisKeyValueStore {
    // ---
    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        // ---
        let mut conn = self.get_conn().await?;

        // Redis rejects a zero expiry.
        let seconds = ttl.as_secs().max(1);
        conn.set_ex::<_, _, ()>(key, value, seconds)
            .await
            .with_context(|| format!("SET EX {key}"))?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        // ---
        let mut conn = self.get_conn().await?;
        let value: Option<String> = conn.get(key).await.with_context(|| format!("GET {key}"))?;
        Ok(value)
    }

    async fn ping(&self) -> Result<()> {
        // ---
        let mut conn = self.get_conn().await?;
        let _: String = conn.ping().await.context("PING")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::infrastructure::redis_store::create_redis_store;

    #[test]
    fn invalid_url_is_rejected() {
        assert!(create_redis_store("not a url").is_err());
    }

    #[tokio::test]
    async fn unreachable_server_is_an_error() {
        // ---
        let store = create_redis_store("redis://invalid-host:6379").unwrap();
        assert!(store.ping().await.is_err());
        assert!(store.get("anything").await.is_err());
    }
}
