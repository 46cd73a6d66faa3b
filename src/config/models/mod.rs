//! Configuration data models
//!
//! This module defines all configuration structures used by the hooks.

#![allow(missing_docs)]

pub mod alerting;
pub mod billing;

// Re-export all configuration types
pub use alerting::*;
pub use billing::*;

/// Default spend collector endpoint
pub fn default_collector_url() -> String {
    "https://berrispend.berri.ai/spend".to_string()
}

/// Default timeout in seconds
pub fn default_timeout() -> u64 {
    30
}
