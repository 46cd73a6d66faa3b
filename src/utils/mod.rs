//! Utility modules for the hook pipeline
//!
//! - **error**: Error types shared by every component
//! - **logging**: Tracing subscriber setup

pub mod error;
pub mod logging;
