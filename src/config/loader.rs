//! Configuration loading utilities
//!
//! This module provides utilities for loading configuration from environment
//! variables. Lookups go through a closure so tests can supply their own map.

use super::models::*;
use crate::monitoring::{AlertType, AlertingChannel};
use crate::utils::error::{GatewayError, Result};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::debug;

impl BillingConfig {
    /// Load billing configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load billing configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(account_id) = lookup("BERRISPEND_ACCOUNT_ID") {
            config.account_id = Some(account_id);
            config.enabled = true;
        }
        if let Some(url) = lookup("SPEND_COLLECTOR_URL") {
            config.collector_url = url;
            config.enabled = true;
        }
        if let Some(timeout) = lookup("SPEND_TIMEOUT_SECS") {
            config.timeout_secs = timeout
                .parse()
                .map_err(|e| GatewayError::Config(format!("Invalid spend timeout: {}", e)))?;
        }
        if let Some(policy) = lookup("SPEND_UNKNOWN_MODEL_POLICY") {
            config.unknown_model_policy = policy.parse().map_err(|e| {
                GatewayError::Config(format!("Invalid unknown model policy: {}", e))
            })?;
        }
        if let Some(path) = lookup("SPEND_PRICING_FILE") {
            config.pricing_file = Some(PathBuf::from(path));
        }

        debug!(enabled = config.enabled, "Billing configuration loaded from environment");
        Ok(config)
    }
}

impl AlertingConfig {
    /// Load alerting configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load alerting configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(channels) = lookup("ALERTING") {
            config.channels = parse_list::<AlertingChannel>(&channels, "alerting channel")?;
        }
        if let Some(threshold) = lookup("ALERTING_THRESHOLD") {
            config.threshold_seconds = Some(threshold.trim().parse().map_err(|e| {
                GatewayError::Config(format!("Invalid alerting threshold: {}", e))
            })?);
        }
        if let Some(types) = lookup("ALERT_TYPES") {
            config.alert_types = parse_list::<AlertType>(&types, "alert type")?;
        }
        config.slack_webhook = lookup("SLACK_WEBHOOK_URL");
        config.webhook_url = lookup("ALERT_WEBHOOK_URL");
        config.proxy_base_url = lookup("PROXY_BASE_URL");

        if let (Some(host), Some(project_id)) = (lookup("LANGFUSE_HOST"), lookup("LANGFUSE_PROJECT_ID")) {
            config.langfuse = Some(LangfuseConfig { host, project_id });
        }
        if let Some(ttl) = lookup("ALERT_DEDUP_TTL_SECS") {
            config.dedup_ttl_secs = Some(
                ttl.parse()
                    .map_err(|e| GatewayError::Config(format!("Invalid dedup TTL: {}", e)))?,
            );
        }

        debug!(
            channels = config.channels.len(),
            alert_types = config.alert_types.len(),
            "Alerting configuration loaded from environment"
        );
        Ok(config)
    }
}

/// Parse a comma separated list, ignoring empty items
fn parse_list<T>(value: &str, what: &str) -> Result<Vec<T>>
where
    T: FromStr<Err = String>,
{
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| {
            item.parse::<T>()
                .map_err(|e| GatewayError::Config(format!("Invalid {}: {}", what, e)))
        })
        .collect()
}
