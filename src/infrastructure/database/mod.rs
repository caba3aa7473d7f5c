//! PostgreSQL persistence: pool setup, schema bootstrap, and the repository.

mod postgres_repository;


pub use postgres_repository::PostgresRepository;

use crate::config::DatabaseConfig;
use crate::domain::RepositoryPtr;
use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

/// Delay between connection attempts at startup.
const RETRY_DELAY: Duration = Duration::from_secs(2);

/// Idempotent schema, applied on every startup.
const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS users (
        id UUID PRIMARY KEY,
        name VARCHAR(255) NOT NULL,
        phone_number VARCHAR(20) NOT NULL UNIQUE,
        has_used_service BOOLEAN NOT NULL DEFAULT FALSE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )",
    "CREATE TABLE IF NOT EXISTS analysis_history (
        id UUID PRIMARY KEY,
        user_id UUID NOT NULL REFERENCES users(id),
        image_url TEXT NOT NULL,
        analysis_data TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        seq BIGSERIAL
    )",
    "CREATE INDEX IF NOT EXISTS analysis_history_user_seq
        ON analysis_history (user_id, seq)",
];

/// Connects to PostgreSQL, retrying while the server comes up.
///
/// # Errors
/// Returns the last connection error once `retry_count` attempts are exhausted.
pub async fn connect_with_retry(config: &DatabaseConfig) -> Result<PgPool> {
    // ---
    let options = PgPoolOptions::new()
        .acquire_timeout(config.acquire_timeout)
        .min_connections(config.min_connections)
        .max_connections(config.max_connections);

    let attempts = config.retry_count.max(1);
    let mut attempt = 0;
    loop {
        attempt += 1;
        match options.clone().connect(&config.database_url).await {
            Ok(pool) => {
                tracing::info!("Connected to PostgreSQL after {attempt} attempt(s)");
                return Ok(pool);
            }
            Err(e) if attempt < attempts => {
                tracing::warn!("PostgreSQL not ready (attempt {attempt}/{attempts}): {e}");
                tokio::time::sleep(RETRY_DELAY).await;
            }
            Err(e) => return Err(e).context("connect to PostgreSQL"),
        }
    }
}

/// Creates tables and indexes if they do not exist yet.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    // ---
    for statement in SCHEMA {
        sqlx::query(statement)
            .execute(pool)
            .await
            .with_context(|| format!("apply schema: {statement}"))?;
    }
    Ok(())
}

/// Connects, bootstraps the schema, and wraps the pool in a repository.
pub async fn create_postgres_repository(config: &DatabaseConfig) -> Result<RepositoryPtr> {
    // ---
    let pool = connect_with_retry(config).await?;
    ensure_schema(&pool).await?;
    Ok(Arc::new(PostgresRepository::new(pool)))
}
