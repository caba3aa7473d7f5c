// Gateway module - controls public API for handlers
// Modules are private, only exported symbols are public

mod analyze;
mod auth;
mod conditions;
mod health;
mod history;
mod metrics;
mod root;
mod shared_types;

// Core handlers
pub use health::health_check;
pub use metrics::{metrics_handler, track_metrics};
pub use root::root_handler;

// Phone authentication handlers
pub use auth::{mark_used, send_otp, verify_otp};

// Analysis handlers
pub use analyze::{analyze_skin, MAX_UPLOAD_BYTES};
pub use conditions::get_condition;
pub use history::{get_history, store_analysis};
