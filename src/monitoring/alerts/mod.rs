//! Alert management system
//!
//! Failure and latency hooks, the runtime alert configuration, and the
//! notification channels alerts are delivered through.

mod cache;
mod channels;
mod config;
mod engine;
mod latency;


// Re-export public types
pub use cache::{DedupCache, MokaDedupCache};
pub use channels::{NotificationChannel, SlackChannel, WebhookChannel};
pub use config::{AlertConfig, AlertingUpdate};
pub use engine::{AlertDecision, AlertingEngine, SuppressReason};
pub use latency::{SlowResponse, format_seconds, resolve_api_base};
