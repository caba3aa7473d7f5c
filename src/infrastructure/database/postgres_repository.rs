use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{AnalysisRecord, MarkUsed, Repository, User};

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    phone_number: String,
    has_used_service: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(r: UserRow) -> Self {
        User {
            id: r.id,
            name: r.name,
            phone_number: r.phone_number,
            has_used_service: r.has_used_service,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct AnalysisRow {
    id: Uuid,
    user_id: Uuid,
    image_url: String,
    analysis_data: String,
    created_at: DateTime<Utc>,
}

impl From<AnalysisRow> for AnalysisRecord {
    fn from(r: AnalysisRow) -> Self {
        AnalysisRecord {
            id: r.id,
            user_id: r.user_id,
            image_ref: r.image_url,
            analysis_data: r.analysis_data,
            created_at: r.created_at,
        }
    }
}

const USER_COLUMNS: &str = "id, name, phone_number, has_used_service, created_at, updated_at";

pub struct PostgresRepository {
    // ---
    pool: PgPool,
}

impl PostgresRepository {
    // ---
    pub fn new(pool: PgPool) -> Self {
        // ---
        Self { pool }
    }
}

#[async_trait::async_trait]
impl Repository for PostgresRepository {
    // ---
    async fn find_or_create_user(&self, name: &str, phone_number: &str) -> Result<User> {
        // ---
        // The no-op update makes RETURNING yield the existing row on conflict.
        let user = User::new(name.to_string(), phone_number.to_string());
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "INSERT INTO users (id, name, phone_number, has_used_service, created_at, updated_at)
             VALUES ($1, $2, $3, FALSE, $4, $4)
             ON CONFLICT (phone_number) DO UPDATE SET phone_number = EXCLUDED.phone_number
             RETURNING {USER_COLUMNS}"
        ))
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.phone_number)
        .bind(user.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn get_user_by_phone(&self, phone_number: &str) -> Result<Option<User>> {
        // ---
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE phone_number = $1"
        ))
        .bind(phone_number)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    async fn mark_user_used(&self, user_id: Uuid) -> Result<MarkUsed> {
        // ---
        let updated = sqlx::query(
            "UPDATE users SET has_used_service = TRUE, updated_at = now()
             WHERE id = $1 AND has_used_service = FALSE",
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        if updated.rows_affected() == 1 {
            return Ok(MarkUsed::Marked);
        }

        // Lost the swap: tell "already used" apart from "no such user".
        let exists: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(match exists {
            Some(_) => MarkUsed::AlreadyUsed,
            None => MarkUsed::NotFound,
        })
    }

    async fn record_usage(&self, user_id: Uuid) -> Result<()> {
        // ---
        sqlx::query("UPDATE users SET has_used_service = TRUE, updated_at = now() WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn insert_analysis(&self, record: AnalysisRecord) -> Result<()> {
        // ---
        sqlx::query(
            "INSERT INTO analysis_history (id, user_id, image_url, analysis_data, created_at)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(record.id)
        .bind(record.user_id)
        .bind(&record.image_ref)
        .bind(&record.analysis_data)
        .bind(record.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn recent_analyses(&self, user_id: Uuid, limit: usize) -> Result<Vec<AnalysisRecord>> {
        // ---
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = sqlx::query_as::<_, AnalysisRow>(
            "SELECT id, user_id, image_url, analysis_data, created_at FROM (
                 SELECT id, user_id, image_url, analysis_data, created_at, seq
                 FROM analysis_history WHERE user_id = $1
                 ORDER BY seq DESC LIMIT $2
             ) recent ORDER BY seq ASC",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(AnalysisRecord::from).collect())
    }

    async fn ping(&self) -> Result<()> {
        // ---
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
