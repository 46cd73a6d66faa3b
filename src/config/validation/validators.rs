//! Billing and alerting configuration validators

use super::trait_def::Validate;
use super::urls::validate_http_url;
use crate::config::models::*;
use crate::monitoring::AlertingChannel;
use tracing::debug;

impl Validate for BillingConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating billing configuration");

        if !self.enabled {
            return Ok(());
        }

        validate_http_url(&self.collector_url, "Spend collector")?;

        if self.timeout_secs == 0 {
            return Err("Spend collector timeout must be greater than 0".to_string());
        }

        if let Some(account_id) = &self.account_id {
            if account_id.trim().is_empty() {
                return Err("Account id cannot be empty".to_string());
            }
        }

        Ok(())
    }
}

impl Validate for AlertingConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating alerting configuration");

        if let Some(threshold) = self.threshold_seconds {
            if !threshold.is_finite() || threshold <= 0.0 {
                return Err(format!(
                    "Alerting threshold must be a positive number of seconds, got {}",
                    threshold
                ));
            }
        }

        for channel in &self.channels {
            match channel {
                AlertingChannel::Slack => {
                    let url = self.slack_webhook.as_deref().ok_or_else(|| {
                        "Slack alerting is enabled but no Slack webhook URL is set".to_string()
                    })?;
                    validate_http_url(url, "Slack webhook")?;
                }
                AlertingChannel::Webhook => {
                    let url = self.webhook_url.as_deref().ok_or_else(|| {
                        "Webhook alerting is enabled but no webhook URL is set".to_string()
                    })?;
                    validate_http_url(url, "Alert webhook")?;
                }
            }
        }

        if let Some(proxy_base_url) = &self.proxy_base_url {
            validate_http_url(proxy_base_url, "Proxy base")?;
        }

        if let Some(langfuse) = &self.langfuse {
            validate_http_url(&langfuse.host, "Langfuse host")?;
            if langfuse.project_id.trim().is_empty() {
                return Err("Langfuse project id cannot be empty".to_string());
            }
        }

        if self.dedup_ttl_secs == Some(0) {
            return Err("Alert dedup TTL must be greater than 0".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("Alerting timeout must be greater than 0".to_string());
        }

        Ok(())
    }
}
