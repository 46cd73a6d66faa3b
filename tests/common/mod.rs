//! Common test utilities for litellm-hooks
//!
//! - Call outcome fixtures with sensible defaults
//! - Polling helpers for wiremock servers, since hooks deliver from
//!   detached tasks

pub mod fixtures;

// Re-export commonly used items
pub use fixtures::{OutcomeFactory, accepting_server, wait_for_requests};
