//! Operator alerting
//!
//! This module decides when a completed or failed call deserves an alert and
//! delivers it to the configured notification channels.

pub mod alerts;
mod types;


// Re-export public types
pub use types::{AlertEvent, AlertSeverity, AlertType, AlertingChannel};
