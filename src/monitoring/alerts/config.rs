//! Runtime alert configuration snapshot

use super::cache::DedupCache;
use crate::monitoring::types::{AlertType, AlertingChannel};
use std::collections::HashSet;
use std::sync::Arc;

/// Alerting settings read by every hook invocation.
///
/// A snapshot is never mutated in place: updates build a new value that is
/// swapped in whole.
#[derive(Debug, Clone, Default)]
pub struct AlertConfig {
    pub enabled_channels: Vec<AlertingChannel>,
    /// Seconds; `None` disables the latency check
    pub alerting_threshold: Option<f64>,
    pub enabled_alert_types: HashSet<AlertType>,
    pub shared_cache: Option<Arc<dyn DedupCache>>,
}

impl AlertConfig {
    pub fn is_enabled(&self, alert_type: AlertType) -> bool {
        self.enabled_alert_types.contains(&alert_type)
    }

    pub fn has_channels(&self) -> bool {
        !self.enabled_channels.is_empty()
    }

    /// New snapshot with the fields set in `update` replaced
    pub fn apply(&self, update: &AlertingUpdate) -> Self {
        Self {
            enabled_channels: update
                .alerting
                .clone()
                .unwrap_or_else(|| self.enabled_channels.clone()),
            alerting_threshold: update.alerting_threshold.unwrap_or(self.alerting_threshold),
            enabled_alert_types: update
                .alert_types
                .as_ref()
                .map(|types| types.iter().copied().collect())
                .unwrap_or_else(|| self.enabled_alert_types.clone()),
            shared_cache: update
                .shared_cache
                .clone()
                .unwrap_or_else(|| self.shared_cache.clone()),
        }
    }
}

/// Partial update for [`AlertConfig`]; `None` fields keep their current value.
///
/// The optional settings are tri-state: `Some(None)` clears them.
#[derive(Debug, Clone, Default)]
pub struct AlertingUpdate {
    pub alerting: Option<Vec<AlertingChannel>>,
    pub alerting_threshold: Option<Option<f64>>,
    pub shared_cache: Option<Option<Arc<dyn DedupCache>>>,
    pub alert_types: Option<Vec<AlertType>>,
}

impl AlertingUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alerting(mut self, channels: Vec<AlertingChannel>) -> Self {
        self.alerting = Some(channels);
        self
    }

    pub fn alerting_threshold(mut self, seconds: f64) -> Self {
        self.alerting_threshold = Some(Some(seconds));
        self
    }

    /// Turn the latency check off
    pub fn clear_alerting_threshold(mut self) -> Self {
        self.alerting_threshold = Some(None);
        self
    }

    pub fn shared_cache(mut self, cache: Arc<dyn DedupCache>) -> Self {
        self.shared_cache = Some(Some(cache));
        self
    }

    /// Stop deduplicating alerts
    pub fn clear_shared_cache(mut self) -> Self {
        self.shared_cache = Some(None);
        self
    }

    pub fn alert_types(mut self, types: Vec<AlertType>) -> Self {
        self.alert_types = Some(types);
        self
    }
}
