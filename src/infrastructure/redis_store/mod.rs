mod redis_kv_store;

pub use redis_kv_store::RedisKeyValueStore;

use crate::domain::KeyValueStorePtr;
use anyhow::Result;
use std::sync::Arc;

/// Creates a Redis-backed key-value store.
///
/// Only parses the URL; connections are opened per operation, so a Redis
/// outage surfaces as request-level errors rather than a startup failure.
pub fn create_redis_store(url: &str) -> Result<KeyValueStorePtr> {
    // ---
    let client = redis::Client::open(url)?;
    Ok(Arc::new(RedisKeyValueStore::new(client)))
}
