//! Type definitions for the pricing service

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Per-token prices and context size of one model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingEntry {
    /// Maximum total tokens
    pub max_tokens: u32,
    /// Input cost per token
    pub input_cost_per_token: f64,
    /// Output cost per token
    pub output_cost_per_token: f64,
}

impl PricingEntry {
    pub const fn new(max_tokens: u32, input_cost_per_token: f64, output_cost_per_token: f64) -> Self {
        Self {
            max_tokens,
            input_cost_per_token,
            output_cost_per_token,
        }
    }
}

/// Cost calculation result
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostResult {
    /// Cost attributed to the prompt
    pub prompt_cost: f64,
    /// Cost attributed to the completion
    pub completion_cost: f64,
    /// The type of cost calculation used
    pub cost_type: CostType,
}

impl CostResult {
    /// Total cost (prompt + completion)
    pub fn total_cost(&self) -> f64 {
        self.prompt_cost + self.completion_cost
    }
}

/// Type of cost calculation method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CostType {
    /// Model found in the table, priced per token
    TokenBased,
    /// Duration-billed provider, priced per second of runtime
    TimeBased,
    /// Unknown model priced with the table-wide mean rates
    AverageFallback,
}

/// What to do with a model that is neither in the table nor duration-billed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownModelPolicy {
    /// Price with the mean input/output rates of the whole table
    #[default]
    #[serde(alias = "average")]
    AverageRates,
    /// Fail with [`PricingError::UnsupportedModel`]
    Reject,
}

impl std::str::FromStr for UnknownModelPolicy {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "average" | "average_rates" => Ok(Self::AverageRates),
            "reject" => Ok(Self::Reject),
            other => Err(PricingError::Parse(format!(
                "unknown model policy '{}', expected 'average' or 'reject'",
                other
            ))),
        }
    }
}

/// Pricing resolution errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    #[error("Model not supported for pricing: {0}")]
    UnsupportedModel(String),

    #[error("Invalid pricing entry for {model}: {message}")]
    InvalidEntry { model: String, message: String },

    #[error("Failed to parse pricing data: {0}")]
    Parse(String),
}
