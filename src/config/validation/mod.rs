//! Configuration validation
//!
//! This module provides validation logic for all configuration structures.
//!
//! The validation is organized into several submodules:
//! - `trait_def`: Core Validate trait definition
//! - `urls`: endpoint URL checks
//! - `validators`: billing and alerting validators
//! - `tests`: Test suite for all validators

mod trait_def;
mod urls;
mod validators;


pub use trait_def::Validate;
pub use urls::validate_http_url;
