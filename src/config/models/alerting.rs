//! Alerting configuration

use super::*;
use crate::monitoring::{AlertType, AlertingChannel};
use serde::{Deserialize, Serialize};

/// Alerting configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertingConfig {
    /// Channels alerts are delivered to
    #[serde(default)]
    pub channels: Vec<AlertingChannel>,
    /// Latency above which a slow-response alert fires, in seconds
    #[serde(default)]
    pub threshold_seconds: Option<f64>,
    /// Alert categories that may fire
    #[serde(default)]
    pub alert_types: Vec<AlertType>,
    /// Slack incoming webhook URL
    #[serde(default)]
    pub slack_webhook: Option<String>,
    /// Generic JSON webhook URL
    #[serde(default)]
    pub webhook_url: Option<String>,
    /// Public URL of the proxy, appended to Slack messages
    #[serde(default)]
    pub proxy_base_url: Option<String>,
    /// Trace viewer linked from slow-response alerts
    #[serde(default)]
    pub langfuse: Option<LangfuseConfig>,
    /// Suppress repeats of the same alert for this many seconds
    #[serde(default)]
    pub dedup_ttl_secs: Option<u64>,
    /// Channel request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for AlertingConfig {
    fn default() -> Self {
        Self {
            channels: Vec::new(),
            threshold_seconds: None,
            alert_types: Vec::new(),
            slack_webhook: None,
            webhook_url: None,
            proxy_base_url: None,
            langfuse: None,
            dedup_ttl_secs: None,
            timeout_secs: default_timeout(),
        }
    }
}

impl AlertingConfig {
    /// Merge alerting configurations
    pub fn merge(mut self, other: Self) -> Self {
        if !other.channels.is_empty() {
            self.channels = other.channels;
        }
        if other.threshold_seconds.is_some() {
            self.threshold_seconds = other.threshold_seconds;
        }
        if !other.alert_types.is_empty() {
            self.alert_types = other.alert_types;
        }
        if other.slack_webhook.is_some() {
            self.slack_webhook = other.slack_webhook;
        }
        if other.webhook_url.is_some() {
            self.webhook_url = other.webhook_url;
        }
        if other.proxy_base_url.is_some() {
            self.proxy_base_url = other.proxy_base_url;
        }
        if other.langfuse.is_some() {
            self.langfuse = other.langfuse;
        }
        if other.dedup_ttl_secs.is_some() {
            self.dedup_ttl_secs = other.dedup_ttl_secs;
        }
        if other.timeout_secs != default_timeout() {
            self.timeout_secs = other.timeout_secs;
        }
        self
    }
}

/// Langfuse project used to build trace links
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LangfuseConfig {
    pub host: String,
    pub project_id: String,
}

impl LangfuseConfig {
    /// Link to a trace in the Langfuse UI
    pub fn trace_url(&self, trace_id: &str) -> String {
        format!(
            "{}/project/{}/traces/{}",
            self.host.trim_end_matches('/'),
            self.project_id,
            trace_id
        )
    }
}
