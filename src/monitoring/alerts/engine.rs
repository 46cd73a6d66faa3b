//! Alert evaluation and dispatch

use super::cache::MokaDedupCache;
use super::channels::{NotificationChannel, SlackChannel, WebhookChannel};
use super::config::{AlertConfig, AlertingUpdate};
use super::latency::{SlowResponse, slow_response_details};
use crate::config::{AlertingConfig, LangfuseConfig};
use crate::core::types::{CallParameters, CallerContext, ExceptionKind, HookException};
use crate::monitoring::types::{AlertEvent, AlertSeverity, AlertType, AlertingChannel};
use crate::utils::error::Result;
use arc_swap::ArcSwap;
use chrono::{DateTime, Utc};
use futures::future::join_all;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::task::TaskTracker;
use tracing::{debug, info, warn};

/// Why a hook decided not to alert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuppressReason {
    /// No channel is enabled
    NoChannels,
    /// The alert category is not enabled
    AlertTypeDisabled(AlertType),
    /// The failure came from the gateway itself, not a model provider
    HostException,
    /// No latency threshold configured
    ThresholdNotSet,
    /// The call finished within the threshold
    WithinThreshold,
}

/// Result of evaluating one hook invocation
#[derive(Debug, Clone, PartialEq)]
pub enum AlertDecision {
    Suppressed(SuppressReason),
    /// Delivery has been scheduled for this event
    Dispatched(AlertEvent),
}

impl AlertDecision {
    pub fn is_dispatched(&self) -> bool {
        matches!(self, AlertDecision::Dispatched(_))
    }

    pub fn event(&self) -> Option<&AlertEvent> {
        match self {
            AlertDecision::Dispatched(event) => Some(event),
            AlertDecision::Suppressed(_) => None,
        }
    }
}

/// Decides when calls deserve an operator alert and fans alerts out to the
/// notification channels.
///
/// The configuration is an immutable snapshot behind an [`ArcSwap`]: every
/// hook loads one snapshot and uses it for its whole evaluation, and
/// [`update_values`](Self::update_values) publishes a new one atomically.
#[derive(Debug, Default)]
pub struct AlertingEngine {
    config: ArcSwap<AlertConfig>,
    channels: HashMap<AlertingChannel, Arc<dyn NotificationChannel>>,
    langfuse: Option<LangfuseConfig>,
    tasks: TaskTracker,
}

impl AlertingEngine {
    /// Engine with default configuration and no channel implementations
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the implementation used for `channel.kind()`
    pub fn with_channel(mut self, channel: Arc<dyn NotificationChannel>) -> Self {
        self.channels.insert(channel.kind(), channel);
        self
    }

    pub fn with_langfuse(mut self, langfuse: LangfuseConfig) -> Self {
        self.langfuse = Some(langfuse);
        self
    }

    /// Build channels and the initial snapshot from configuration
    pub fn from_config(config: &AlertingConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let mut engine = Self::new();

        if let Some(url) = &config.slack_webhook {
            engine = engine.with_channel(Arc::new(SlackChannel::new(
                url.clone(),
                config.proxy_base_url.clone(),
                timeout,
            )?));
        }
        if let Some(url) = &config.webhook_url {
            engine = engine.with_channel(Arc::new(WebhookChannel::new(url.clone(), timeout)?));
        }
        if let Some(langfuse) = &config.langfuse {
            engine = engine.with_langfuse(langfuse.clone());
        }

        let mut update = AlertingUpdate::new()
            .alerting(config.channels.clone())
            .alert_types(config.alert_types.clone());
        if let Some(threshold) = config.threshold_seconds {
            update = update.alerting_threshold(threshold);
        }
        if let Some(ttl) = config.dedup_ttl_secs {
            update = update.shared_cache(Arc::new(MokaDedupCache::new(Duration::from_secs(ttl))));
        }
        engine.update_values(update);

        Ok(engine)
    }

    /// Alert deliveries still in flight
    pub fn tasks(&self) -> &TaskTracker {
        &self.tasks
    }

    /// Current configuration snapshot
    pub fn config(&self) -> Arc<AlertConfig> {
        self.config.load_full()
    }

    /// Publish a new snapshot built from the current one plus `update`
    pub fn update_values(&self, update: AlertingUpdate) {
        self.config.rcu(|current| Arc::new(current.apply(&update)));
        let current = self.config.load();

        info!(
            channels = current.enabled_channels.len(),
            threshold = ?current.alerting_threshold,
            alert_types = current.enabled_alert_types.len(),
            shared_cache = current.shared_cache.is_some(),
            "Alerting configuration updated"
        );
    }

    /// Alert on exceptions raised by a model provider
    pub fn post_call_failure_hook(
        &self,
        exception: &HookException,
        caller: &CallerContext,
    ) -> AlertDecision {
        let config = self.config.load_full();

        if !config.has_channels() {
            return AlertDecision::Suppressed(SuppressReason::NoChannels);
        }
        if !config.is_enabled(AlertType::LlmExceptions) {
            return AlertDecision::Suppressed(SuppressReason::AlertTypeDisabled(
                AlertType::LlmExceptions,
            ));
        }

        match exception.kind() {
            ExceptionKind::Host => {
                debug!(
                    status = ?exception.status(),
                    key_alias = ?caller.key_alias,
                    "Gateway-side exception, not alerting"
                );
                AlertDecision::Suppressed(SuppressReason::HostException)
            }
            ExceptionKind::Provider => {
                let event = self.dispatch(
                    &config,
                    AlertEvent::new(
                        format!("LLM API call failed: {}", exception),
                        AlertSeverity::High,
                        AlertType::LlmExceptions,
                    ),
                );
                AlertDecision::Dispatched(event)
            }
        }
    }

    /// Alert when a call took longer than the configured threshold
    pub fn response_latency_check(
        &self,
        call: &CallParameters,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> AlertDecision {
        let config = self.config.load_full();

        if !config.has_channels() {
            return AlertDecision::Suppressed(SuppressReason::NoChannels);
        }
        if !config.is_enabled(AlertType::LlmTooSlow) {
            return AlertDecision::Suppressed(SuppressReason::AlertTypeDisabled(
                AlertType::LlmTooSlow,
            ));
        }
        let Some(threshold) = config.alerting_threshold else {
            return AlertDecision::Suppressed(SuppressReason::ThresholdNotSet);
        };

        let details = self.slow_response_details(call, start_time, end_time);
        if details.elapsed <= threshold {
            return AlertDecision::Suppressed(SuppressReason::WithinThreshold);
        }

        let event = self.dispatch(
            &config,
            AlertEvent::new(
                details.alert_message(threshold),
                AlertSeverity::Low,
                AlertType::LlmTooSlow,
            ),
        );
        AlertDecision::Dispatched(event)
    }

    /// Elapsed time, model, endpoint and messages of a call
    pub fn slow_response_details(
        &self,
        call: &CallParameters,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> SlowResponse {
        slow_response_details(call, start_time, end_time, self.langfuse.as_ref())
    }

    /// Build an alert and schedule its delivery to every enabled channel
    pub fn alerting_handler(
        &self,
        message: impl Into<String>,
        level: AlertSeverity,
        alert_type: AlertType,
    ) -> AlertEvent {
        let config = self.config.load_full();
        self.dispatch(&config, AlertEvent::new(message, level, alert_type))
    }

    fn dispatch(&self, config: &AlertConfig, event: AlertEvent) -> AlertEvent {
        let targets: Vec<Arc<dyn NotificationChannel>> = config
            .enabled_channels
            .iter()
            .filter_map(|kind| {
                let channel = self.channels.get(kind).cloned();
                if channel.is_none() {
                    warn!(channel = %kind, "Alerting channel enabled but not configured");
                }
                channel
            })
            .collect();

        if targets.is_empty() {
            debug!(alert_id = %event.id, "No channel to deliver alert to");
            return event;
        }

        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            warn!(alert_id = %event.id, "No async runtime available, dropping alert");
            return event;
        };

        let shared_cache = config.shared_cache.clone();
        let delivered = event.clone();
        let delivery = async move {
            if let Some(cache) = shared_cache {
                let key = format!("{}:{}", delivered.alert_type, delivered.message);
                if cache.check_and_set(&key).await {
                    debug!(alert_id = %delivered.id, "Duplicate alert suppressed");
                    return;
                }
            }

            let sends = targets.iter().map(|channel| {
                let alert = &delivered;
                async move {
                    if let Err(e) = channel.send(alert).await {
                        warn!("Failed to send alert via {}: {}", channel.name(), e);
                    }
                }
            });
            join_all(sends).await;

            debug!(alert_id = %delivered.id, "Alert delivery finished");
        };
        self.tasks.spawn_on(delivery, &handle);

        event
    }
}
