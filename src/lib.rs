//! # litellm-hooks
//!
//! Post-call spend reporting and operator alerting for an LLM gateway.
//!
//! After every upstream model call the gateway hands the outcome to a
//! [`HookDispatcher`]. The dispatcher prices the call, reports the spend to a
//! billing collector, and raises Slack or webhook alerts for provider failures
//! and slow responses. None of this work runs on the request path: reports
//! and alerts are delivered from detached tasks, and their failures only show
//! up in the logs.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use litellm_hooks::{Config, HookDispatcher};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/hooks.yaml").await?;
//!     let dispatcher = HookDispatcher::from_config(&config).await?;
//!
//!     // let outcome: CallOutcome = ...;
//!     // dispatcher.post_call_hook(outcome);
//!     # let _ = dispatcher;
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod hooks;
pub mod monitoring;
pub mod services;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use crate::core::types::{
    CallOutcome, CallParameters, CallResult, CallerContext, HookException, Message, Usage,
};
pub use hooks::HookDispatcher;
pub use monitoring::alerts::{AlertDecision, AlertingEngine, AlertingUpdate};
pub use monitoring::{AlertEvent, AlertSeverity, AlertType, AlertingChannel};
pub use services::{BillingReporter, CostCalculator, PricingTable};
pub use utils::error::{GatewayError, Result};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
