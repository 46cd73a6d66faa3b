//! Billing collector wire format

use crate::core::types::{CallOutcome, CallResult, Message};
use serde::{Deserialize, Serialize};

/// Billing recipient, loaded once at startup
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountContext {
    pub account_id: Option<String>,
}

impl AccountContext {
    pub fn new(account_id: Option<String>) -> Self {
        Self { account_id }
    }
}

/// Either the generated text or the structured error, never both
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordBody {
    Response(String),
    Error(serde_json::Value),
}

/// One completed call as the collector ingests it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BillingRecord {
    /// Seconds between start and end of the call
    pub response_time: f64,
    /// Model the provider reported, not the requested alias
    pub model_id: String,
    pub total_cost: f64,
    pub messages: Vec<Message>,
    #[serde(flatten)]
    pub body: RecordBody,
    pub account_id: Option<String>,
}

impl BillingRecord {
    pub fn from_outcome(outcome: &CallOutcome, total_cost: f64, account: &AccountContext) -> Self {
        let body = match &outcome.result {
            CallResult::Success(response) => RecordBody::Response(response.content.clone()),
            CallResult::Failure(payload) => RecordBody::Error(payload.error.clone()),
        };

        Self {
            response_time: outcome.response_time(),
            model_id: outcome.result.model().to_string(),
            total_cost,
            messages: outcome.call.messages.clone(),
            body,
            account_id: account.account_id.clone(),
        }
    }
}
