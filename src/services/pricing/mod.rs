//! Model pricing and cost calculation
//!
//! Holds the immutable model price table (built in, or loaded from a
//! LiteLLM-format JSON file) and the calculator that turns a completed call
//! into a prompt/completion cost.

mod calculator;
mod loader;
mod table;
mod types;


// Re-export public types
pub use calculator::{CostCalculator, DURATION_BILLED_MARKER, DURATION_RATE_PER_SECOND};
pub use table::PricingTable;
pub use types::{CostResult, CostType, PricingEntry, PricingError, UnknownModelPolicy};
