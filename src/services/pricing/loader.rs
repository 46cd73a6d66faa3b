//! Data loading functionality for the pricing table

use super::table::PricingTable;
use super::types::{PricingEntry, PricingError};
use crate::utils::error::{GatewayError, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Model entry in the LiteLLM `model_prices_and_context_window.json` layout
#[derive(Debug, Deserialize)]
struct RawModelInfo {
    max_tokens: Option<u32>,
    input_cost_per_token: Option<f64>,
    output_cost_per_token: Option<f64>,
}

impl PricingTable {
    /// Parse a LiteLLM-style pricing document.
    ///
    /// Entries without any per-token price (image or per-second models) are
    /// skipped; a missing side defaults to zero.
    pub fn from_json_str(content: &str) -> std::result::Result<Self, PricingError> {
        let raw: HashMap<String, serde_json::Value> = serde_json::from_str(content)
            .map_err(|e| PricingError::Parse(format!("Failed to parse pricing JSON: {}", e)))?;

        let mut entries = HashMap::with_capacity(raw.len());
        for (model, value) in raw {
            // Sample/spec rows are not objects with the expected shape
            let info: RawModelInfo = match serde_json::from_value(value) {
                Ok(info) => info,
                Err(e) => {
                    debug!("Skipping pricing entry {}: {}", model, e);
                    continue;
                }
            };

            if info.input_cost_per_token.is_none() && info.output_cost_per_token.is_none() {
                debug!("Skipping pricing entry {} without per-token prices", model);
                continue;
            }

            entries.insert(
                model,
                PricingEntry::new(
                    info.max_tokens.unwrap_or(0),
                    info.input_cost_per_token.unwrap_or(0.0),
                    info.output_cost_per_token.unwrap_or(0.0),
                ),
            );
        }

        PricingTable::new(entries)
    }

    /// Load pricing data from a local JSON file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(GatewayError::Io)?;

        let table = Self::from_json_str(&content)?;
        debug!("Loaded {} models from {:?}", table.len(), path);
        Ok(table)
    }
}
