//! Configuration management for the hooks
//!
//! This module handles loading, validation, and merging of the billing and
//! alerting configuration.

mod loader;
pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{GatewayError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct for the hooks
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Spend reporting configuration
    #[serde(default)]
    pub billing: BillingConfig,
    /// Alerting configuration
    #[serde(default)]
    pub alerting: AlertingConfig,
}

impl Config {
    /// Load configuration from file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| GatewayError::Config(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_yaml_str(&content)?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Parse and validate a YAML document
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)
            .map_err(|e| GatewayError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables, honouring a `.env` file
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        if let Ok(path) = dotenvy::dotenv() {
            debug!("Loaded environment overrides from {:?}", path);
        }

        let config = Self {
            billing: BillingConfig::from_env()?,
            alerting: AlertingConfig::from_env()?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Get billing configuration
    pub fn billing(&self) -> &BillingConfig {
        &self.billing
    }

    /// Get alerting configuration
    pub fn alerting(&self) -> &AlertingConfig {
        &self.alerting
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.billing
            .validate()
            .map_err(|e| GatewayError::validation(format!("Billing config error: {}", e)))?;

        self.alerting
            .validate()
            .map_err(|e| GatewayError::validation(format!("Alerting config error: {}", e)))?;

        debug!("Configuration validation completed");
        Ok(())
    }

    /// Merge with another configuration (other takes precedence)
    pub fn merge(mut self, other: Self) -> Self {
        self.billing = self.billing.merge(other.billing);
        self.alerting = self.alerting.merge(other.alerting);
        self
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| GatewayError::Config(format!("Failed to serialize config to YAML: {}", e)))
    }
}
