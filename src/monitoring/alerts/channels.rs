//! Notification channel implementations

use crate::monitoring::types::{AlertEvent, AlertingChannel};
use crate::utils::error::{GatewayError, Result};
use std::time::Duration;

/// Notification channel trait
#[async_trait::async_trait]
pub trait NotificationChannel: Send + Sync + std::fmt::Debug {
    /// Send a notification
    async fn send(&self, alert: &AlertEvent) -> Result<()>;

    /// Get channel name
    fn name(&self) -> &str;

    /// Channel identifier this implementation serves
    fn kind(&self) -> AlertingChannel;
}

/// Slack notification channel
#[derive(Debug, Clone)]
pub struct SlackChannel {
    client: reqwest::Client,
    webhook_url: String,
    proxy_base_url: Option<String>,
}

impl SlackChannel {
    /// Create a new Slack notification channel
    pub fn new(
        webhook_url: impl Into<String>,
        proxy_base_url: Option<String>,
        timeout: Duration,
    ) -> Result<Self> {
        Ok(Self {
            client: reqwest::Client::builder().timeout(timeout).build()?,
            webhook_url: webhook_url.into(),
            proxy_base_url,
        })
    }

    /// Text posted to Slack for an alert
    pub fn format_message(&self, alert: &AlertEvent) -> String {
        let mut text = format!(
            "Level: `{}`\nTimestamp: `{}`\n\nMessage: {}",
            alert.severity,
            alert.timestamp.format("%H:%M:%S"),
            alert.message
        );

        if let Some(proxy_base_url) = &self.proxy_base_url {
            text.push_str(&format!("\n\nProxy URL: `{}`", proxy_base_url));
        }

        text
    }
}

#[async_trait::async_trait]
impl NotificationChannel for SlackChannel {
    async fn send(&self, alert: &AlertEvent) -> Result<()> {
        let payload = serde_json::json!({ "text": self.format_message(alert) });

        let response = self
            .client
            .post(&self.webhook_url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                GatewayError::alert(format!("Failed to send Slack notification: {}", e))
            })?;

        if !response.status().is_success() {
            return Err(GatewayError::alert(format!(
                "Slack webhook returned status: {}",
                response.status()
            )));
        }

        Ok(())
    }

    fn name(&self) -> &str {
        "slack"
    }

    fn kind(&self) -> AlertingChannel {
        AlertingChannel::Slack
    }
}

/// Generic JSON webhook channel, posts the serialized [`AlertEvent`]
#[derive(Debug, Clone)]
pub struct WebhookChannel {
    client: reqwest::Client,
    url: String,
}

impl WebhookChannel {
    /// Create a new webhook notification channel
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: reqwest::Client::builder().timeout(timeout).build()?,
            url: url.into(),
        })
    }
}

#[async_trait::async_trait]
impl NotificationChannel for WebhookChannel {
    async fn send(&self, alert: &AlertEvent) -> Result<()> {
        let response = self
            .client
            .post(&self.url)
            .json(alert)
            .send()
            .await
            .map_err(|e| GatewayError::alert(format!("Failed to send webhook alert: {}", e)))?;

        if !response.status().is_success() {
            return Err(GatewayError::alert(format!(
                "Alert webhook returned status: {}",
                response.status()
            )));
        }

        Ok(())
    }

    fn name(&self) -> &str {
        "webhook"
    }

    fn kind(&self) -> AlertingChannel {
        AlertingChannel::Webhook
    }
}
