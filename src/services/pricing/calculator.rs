//! Cost derivation for a single completed call

use super::table::PricingTable;
use super::types::{CostResult, CostType, PricingError, UnknownModelPolicy};
use crate::core::types::{Usage, elapsed_seconds};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Substring identifying the provider family billed by runtime
pub const DURATION_BILLED_MARKER: &str = "replicate";

/// Runtime price of duration-billed models (A100 hardware), USD per second
pub const DURATION_RATE_PER_SECOND: f64 = 0.0032;

/// Pure cost calculator over an immutable [`PricingTable`]
#[derive(Debug, Clone)]
pub struct CostCalculator {
    table: Arc<PricingTable>,
    unknown_model_policy: UnknownModelPolicy,
}

impl Default for CostCalculator {
    fn default() -> Self {
        Self::new(PricingTable::builtin())
    }
}

impl CostCalculator {
    pub fn new(table: Arc<PricingTable>) -> Self {
        Self {
            table,
            unknown_model_policy: UnknownModelPolicy::default(),
        }
    }

    pub fn with_unknown_model_policy(mut self, policy: UnknownModelPolicy) -> Self {
        self.unknown_model_policy = policy;
        self
    }

    pub fn table(&self) -> &PricingTable {
        &self.table
    }

    pub fn unknown_model_policy(&self) -> UnknownModelPolicy {
        self.unknown_model_policy
    }

    /// Compute the prompt and completion cost of one call.
    ///
    /// Exact table hits are priced per token, duration-billed models per
    /// second of runtime (split evenly), and anything else according to the
    /// configured [`UnknownModelPolicy`].
    pub fn compute_cost(
        &self,
        model: &str,
        usage: &Usage,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Result<CostResult, PricingError> {
        if let Some(entry) = self.table.get(model) {
            return Ok(CostResult {
                prompt_cost: f64::from(usage.prompt_tokens) * entry.input_cost_per_token,
                completion_cost: f64::from(usage.completion_tokens) * entry.output_cost_per_token,
                cost_type: CostType::TokenBased,
            });
        }

        if model.contains(DURATION_BILLED_MARKER) {
            let total = elapsed_seconds(start_time, end_time) * DURATION_RATE_PER_SECOND;
            return Ok(CostResult {
                prompt_cost: total / 2.0,
                completion_cost: total / 2.0,
                cost_type: CostType::TimeBased,
            });
        }

        match self.unknown_model_policy {
            UnknownModelPolicy::AverageRates => {
                let (input_rate, output_rate) = self
                    .table
                    .average_rates()
                    .ok_or_else(|| PricingError::UnsupportedModel(model.to_string()))?;

                Ok(CostResult {
                    prompt_cost: f64::from(usage.prompt_tokens) * input_rate,
                    completion_cost: f64::from(usage.completion_tokens) * output_rate,
                    cost_type: CostType::AverageFallback,
                })
            }
            UnknownModelPolicy::Reject => Err(PricingError::UnsupportedModel(model.to_string())),
        }
    }
}
