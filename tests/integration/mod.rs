//! Integration tests for litellm-hooks
//!
//! These tests verify the interaction between the hooks and the HTTP
//! endpoints they deliver to, using local mock servers.

pub mod alerting_tests;
pub mod billing_reporter_tests;
pub mod dispatcher_tests;
