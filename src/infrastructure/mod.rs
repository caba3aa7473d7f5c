mod database;
mod inference;
mod memory;
pub mod metrics;
mod redis_store;
mod sms;

// Re-export the factory functions for easy access
pub use database::create_postgres_repository;
pub use inference::{create_huggingface_inference, create_offline_inference};
pub use memory::{create_memory_repository, create_memory_store};
pub use metrics::{create_noop_metrics, create_prom_metrics};
pub use redis_store::create_redis_store;
pub use sms::{create_log_sms, create_twilio_sms};
