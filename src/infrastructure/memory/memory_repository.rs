use crate::domain::{AnalysisRecord, MarkUsed, Repository, User};
use anyhow::Result;
use chrono::Utc;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    // Insertion order is history order.
    analyses: Vec<AnalysisRecord>,
}

/// Mutex-guarded tables; every operation is atomic.
pub struct MemoryRepository {
    // ---
    tables: Mutex<Tables>,
}

impl MemoryRepository {
    // ---
    pub fn new() -> Self {
        Self {
            tables: Mutex::new(Tables::default()),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>> {
        self.tables
            .lock()
            .map_err(|_| anyhow::anyhow!("memory repository lock poisoned"))
    }
}

impl Default for MemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Repository for MemoryRepository {
    // ---
    async fn find_or_create_user(&self, name: &str, phone_number: &str) -> Result<User> {
        // ---
        let mut tables = self.lock()?;
        if let Some(user) = tables.users.iter().find(|u| u.phone_number == phone_number) {
            return Ok(user.clone());
        }

        let user = User::new(name.to_string(), phone_number.to_string());
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn get_user_by_phone(&self, phone_number: &str) -> Result<Option<User>> {
        let tables = self.lock()?;
        Ok(tables
            .users
            .iter()
            .find(|u| u.phone_number == phone_number)
            .cloned())
    }

    async fn mark_user_used(&self, user_id: Uuid) -> Result<MarkUsed> {
        // ---
        let mut tables = self.lock()?;
        let Some(user) = tables.users.iter_mut().find(|u| u.id == user_id) else {
            return Ok(MarkUsed::NotFound);
        };

        if user.has_used_service {
            return Ok(MarkUsed::AlreadyUsed);
        }

        user.has_used_service = true;
        user.updated_at = Utc::now();
        Ok(MarkUsed::Marked)
    }

    async fn record_usage(&self, user_id: Uuid) -> Result<()> {
        // ---
        let mut tables = self.lock()?;
        if let Some(user) = tables.users.iter_mut().find(|u| u.id == user_id) {
            user.has_used_service = true;
            user.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn insert_analysis(&self, record: AnalysisRecord) -> Result<()> {
        self.lock()?.analyses.push(record);
        Ok(())
    }

    async fn recent_analyses(&self, user_id: Uuid, limit: usize) -> Result<Vec<AnalysisRecord>> {
        // ---
        let tables = self.lock()?;
        let mine: Vec<&AnalysisRecord> = tables
            .analyses
            .iter()
            .filter(|r| r.user_id == user_id)
            .collect();

        let skip = mine.len().saturating_sub(limit);
        Ok(mine.into_iter().skip(skip).cloned().collect())
    }

    async fn ping(&self) -> Result<()> {
        self.lock().map(|_| ())
    }
}
