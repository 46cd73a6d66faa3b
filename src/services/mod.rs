//! Services module
//!
//! Pricing and spend reporting for completed calls

pub mod billing;
pub mod pricing;

pub use billing::{AccountContext, BillingRecord, BillingReporter};
pub use pricing::{CostCalculator, CostResult, CostType, PricingTable, UnknownModelPolicy};
