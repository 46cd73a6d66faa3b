//! Shared alerting types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Alert severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AlertSeverity {
    Low,
    Medium,
    High,
}

impl fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertSeverity::Low => write!(f, "Low"),
            AlertSeverity::Medium => write!(f, "Medium"),
            AlertSeverity::High => write!(f, "High"),
        }
    }
}

/// Alert categories an operator can enable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    /// Upstream provider failures
    LlmExceptions,
    /// Responses slower than the alerting threshold
    LlmTooSlow,
    LlmRequestsHanging,
    BudgetAlerts,
    DbExceptions,
}

impl AlertType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertType::LlmExceptions => "llm_exceptions",
            AlertType::LlmTooSlow => "llm_too_slow",
            AlertType::LlmRequestsHanging => "llm_requests_hanging",
            AlertType::BudgetAlerts => "budget_alerts",
            AlertType::DbExceptions => "db_exceptions",
        }
    }
}

impl fmt::Display for AlertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlertType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "llm_exceptions" => Ok(AlertType::LlmExceptions),
            "llm_too_slow" => Ok(AlertType::LlmTooSlow),
            "llm_requests_hanging" => Ok(AlertType::LlmRequestsHanging),
            "budget_alerts" => Ok(AlertType::BudgetAlerts),
            "db_exceptions" => Ok(AlertType::DbExceptions),
            other => Err(format!("Unknown alert type: {}", other)),
        }
    }
}

/// Destinations an alert can be delivered to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertingChannel {
    /// Slack incoming webhook
    Slack,
    /// Generic JSON webhook
    Webhook,
}

impl fmt::Display for AlertingChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertingChannel::Slack => write!(f, "slack"),
            AlertingChannel::Webhook => write!(f, "webhook"),
        }
    }
}

impl FromStr for AlertingChannel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "slack" => Ok(AlertingChannel::Slack),
            "webhook" => Ok(AlertingChannel::Webhook),
            other => Err(format!("Unknown alerting channel: {}", other)),
        }
    }
}

/// A single alert, created per dispatch and never stored
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertEvent {
    pub id: Uuid,
    pub message: String,
    #[serde(rename = "level")]
    pub severity: AlertSeverity,
    pub alert_type: AlertType,
    pub timestamp: DateTime<Utc>,
}

impl AlertEvent {
    pub fn new(message: impl Into<String>, severity: AlertSeverity, alert_type: AlertType) -> Self {
        Self {
            id: Uuid::new_v4(),
            message: message.into(),
            severity,
            alert_type,
            timestamp: Utc::now(),
        }
    }
}
