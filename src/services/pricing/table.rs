//! Immutable model pricing table

use super::types::{PricingEntry, PricingError};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Arc;

static BUILTIN_TABLE: Lazy<Arc<PricingTable>> = Lazy::new(|| {
    let entries = [
        ("gpt-3.5-turbo", PricingEntry::new(4000, 0.0000015, 0.000002)),
        // Azure deployment name
        ("gpt-35-turbo", PricingEntry::new(4000, 0.0000015, 0.000002)),
        ("gpt-3.5-turbo-0613", PricingEntry::new(4000, 0.0000015, 0.000002)),
        ("gpt-3.5-turbo-0301", PricingEntry::new(4000, 0.0000015, 0.000002)),
        ("gpt-3.5-turbo-16k", PricingEntry::new(16000, 0.000003, 0.000004)),
        // Azure deployment name
        ("gpt-35-turbo-16k", PricingEntry::new(16000, 0.000003, 0.000004)),
        ("gpt-3.5-turbo-16k-0613", PricingEntry::new(16000, 0.000003, 0.000004)),
        ("gpt-4", PricingEntry::new(8000, 0.000003, 0.00006)),
        ("gpt-4-0613", PricingEntry::new(8000, 0.000003, 0.00006)),
        ("gpt-4-32k", PricingEntry::new(8000, 0.00006, 0.00012)),
        ("claude-instant-1", PricingEntry::new(100000, 0.00000163, 0.00000551)),
        ("claude-2", PricingEntry::new(100000, 0.00001102, 0.00003268)),
        ("text-bison-001", PricingEntry::new(8192, 0.000004, 0.000004)),
        ("chat-bison-001", PricingEntry::new(4096, 0.000002, 0.000002)),
        ("command-nightly", PricingEntry::new(4096, 0.000015, 0.000015)),
    ];

    Arc::new(PricingTable {
        entries: entries
            .into_iter()
            .map(|(model, entry)| (model.to_string(), entry))
            .collect(),
    })
});

/// Read-only mapping from model identifier to its prices.
///
/// Built once at startup and shared through `Arc`; there is no way to mutate
/// a table after construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PricingTable {
    entries: HashMap<String, PricingEntry>,
}

impl PricingTable {
    /// Build a table, rejecting negative or non-finite prices
    pub fn new(entries: HashMap<String, PricingEntry>) -> Result<Self, PricingError> {
        for (model, entry) in &entries {
            validate_entry(model, entry)?;
        }
        Ok(Self { entries })
    }

    /// Table shipped with the crate
    pub fn builtin() -> Arc<PricingTable> {
        Arc::clone(&BUILTIN_TABLE)
    }

    pub fn get(&self, model: &str) -> Option<&PricingEntry> {
        self.entries.get(model)
    }

    /// Context window of a model, if the table knows it
    pub fn max_tokens(&self, model: &str) -> Option<u32> {
        self.entries.get(model).map(|entry| entry.max_tokens)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Mean input and output per-token rates across every entry
    pub fn average_rates(&self) -> Option<(f64, f64)> {
        if self.entries.is_empty() {
            return None;
        }

        let count = self.entries.len() as f64;
        let (input_sum, output_sum) = self
            .entries
            .values()
            .fold((0.0, 0.0), |(input, output), entry| {
                (
                    input + entry.input_cost_per_token,
                    output + entry.output_cost_per_token,
                )
            });

        Some((input_sum / count, output_sum / count))
    }
}

fn validate_entry(model: &str, entry: &PricingEntry) -> Result<(), PricingError> {
    let costs = [
        ("input_cost_per_token", entry.input_cost_per_token),
        ("output_cost_per_token", entry.output_cost_per_token),
    ];

    for (field, value) in costs {
        if !value.is_finite() || value < 0.0 {
            return Err(PricingError::InvalidEntry {
                model: model.to_string(),
                message: format!("{} must be a non-negative number, got {}", field, value),
            });
        }
    }

    Ok(())
}
