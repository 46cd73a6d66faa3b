//! Error handling for the hook pipeline
//!
//! This module defines all error types used throughout the crate.

#![allow(missing_docs)]

use crate::services::pricing::PricingError;
use thiserror::Error;

/// Result type alias for the hook pipeline
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Main error type for the hook pipeline
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Pricing resolution errors
    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Network errors
    #[error("Network error: {0}")]
    Network(String),

    /// Alert dispatch errors
    #[error("Alert error: {0}")]
    Alert(String),
}

impl GatewayError {
    /// Whether the error came from talking to a remote endpoint
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            GatewayError::HttpClient(_) | GatewayError::Network(_) | GatewayError::Alert(_)
        )
    }
}
