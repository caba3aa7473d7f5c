//! In-process backends for local development and tests.
//!
//! Same contracts as the Redis and PostgreSQL backends; nothing survives a
//! restart.

mod memory_repository;
mod memory_store;

pub use memory_repository::MemoryRepository;
pub use memory_store::MemoryStore;

use crate::domain::{KeyValueStorePtr, RepositoryPtr};
use std::sync::Arc;

/// Creates an empty in-memory user and history repository.
pub fn create_memory_repository() -> RepositoryPtr {
    Arc::new(MemoryRepository::new())
}

/// Creates an empty in-memory key-value store with expiry.
pub fn create_memory_store() -> KeyValueStorePtr {
    Arc::new(MemoryStore::new())
}
