//! Spend reporting to an external billing collector

mod record;
mod reporter;


pub use record::{AccountContext, BillingRecord, RecordBody};
pub use reporter::BillingReporter;
