//! Spend reporting configuration

use super::*;
use crate::services::pricing::UnknownModelPolicy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Billing collector configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillingConfig {
    /// Report spend after every call
    #[serde(default)]
    pub enabled: bool,
    /// Collector endpoint receiving the spend records
    #[serde(default = "default_collector_url")]
    pub collector_url: String,
    /// Account the spend is attributed to
    #[serde(default)]
    pub account_id: Option<String>,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// How to price models missing from the table
    #[serde(default)]
    pub unknown_model_policy: UnknownModelPolicy,
    /// LiteLLM-format pricing JSON replacing the built-in table
    #[serde(default)]
    pub pricing_file: Option<PathBuf>,
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            collector_url: default_collector_url(),
            account_id: None,
            timeout_secs: default_timeout(),
            unknown_model_policy: UnknownModelPolicy::default(),
            pricing_file: None,
        }
    }
}

impl BillingConfig {
    /// Merge billing configurations
    pub fn merge(mut self, other: Self) -> Self {
        if other.enabled {
            self.enabled = other.enabled;
        }
        if other.collector_url != default_collector_url() {
            self.collector_url = other.collector_url;
        }
        if other.account_id.is_some() {
            self.account_id = other.account_id;
        }
        if other.timeout_secs != default_timeout() {
            self.timeout_secs = other.timeout_secs;
        }
        if other.unknown_model_policy != UnknownModelPolicy::default() {
            self.unknown_model_policy = other.unknown_model_policy;
        }
        if other.pricing_file.is_some() {
            self.pricing_file = other.pricing_file;
        }
        self
    }
}
