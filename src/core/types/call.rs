//! Completed-call records handed to the post-call hooks

use super::message::Message;
use super::usage::Usage;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Original request as seen by the proxy server
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProxyServerRequest {
    /// URL the client called on the proxy
    #[serde(default)]
    pub url: Option<String>,
    /// Raw request body
    #[serde(default)]
    pub body: serde_json::Value,
}

/// Provider-specific parameters the gateway attached to the upstream call.
///
/// Different providers carry the endpoint in different places: OpenAI/Azure
/// style calls set `api_base` directly, Vertex calls only know their project
/// and location, and proxied calls keep it inside the original request body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderParams {
    #[serde(default)]
    pub api_base: Option<String>,
    #[serde(default)]
    pub custom_llm_provider: Option<String>,
    #[serde(default)]
    pub vertex_project: Option<String>,
    #[serde(default)]
    pub vertex_location: Option<String>,
    /// Maps a public model alias to the deployment model name
    #[serde(default)]
    pub model_alias_map: HashMap<String, String>,
    #[serde(default)]
    pub proxy_server_request: Option<ProxyServerRequest>,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
    /// Gateway-assigned id of this call
    #[serde(default, alias = "litellm_call_id")]
    pub call_id: Option<String>,
    /// Everything else the provider integration passed along
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// What the gateway sent upstream
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CallParameters {
    /// Requested model (may be an alias)
    pub model: String,
    #[serde(default)]
    pub messages: Vec<Message>,
    /// Embedding-style input, used when there are no chat messages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<serde_json::Value>,
    #[serde(default, alias = "litellm_params")]
    pub params: ProviderParams,
}

impl CallParameters {
    pub fn new(model: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            model: model.into(),
            messages,
            input: None,
            params: ProviderParams::default(),
        }
    }

    pub fn with_params(mut self, params: ProviderParams) -> Self {
        self.params = params;
        self
    }
}

/// Generated message of a successful call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelResponse {
    /// Model the provider actually served
    pub model: String,
    /// Content of the first generated message
    pub content: String,
}

/// Structured error of a failed call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorPayload {
    /// Model the provider reported for the failed call
    pub model: String,
    pub error: serde_json::Value,
}

/// Outcome of the upstream call: exactly one of response or error
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CallResult {
    Success(ModelResponse),
    Failure(ErrorPayload),
}

impl CallResult {
    /// Model identifier reported by the provider
    pub fn model(&self) -> &str {
        match self {
            CallResult::Success(response) => &response.model,
            CallResult::Failure(payload) => &payload.model,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, CallResult::Success(_))
    }
}

/// A completed upstream call with timing and usage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallOutcome {
    #[serde(flatten)]
    pub call: CallParameters,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(default)]
    pub usage: Usage,
    pub result: CallResult,
}

impl CallOutcome {
    /// Wall-clock duration of the call in seconds
    pub fn response_time(&self) -> f64 {
        elapsed_seconds(self.start_time, self.end_time)
    }
}

/// Seconds between two timestamps, clamped at zero when `end` precedes `start`
pub fn elapsed_seconds(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    let delta = end.signed_duration_since(start);
    let seconds = match delta.num_microseconds() {
        Some(micros) => micros as f64 / 1_000_000.0,
        None => delta.num_milliseconds() as f64 / 1_000.0,
    };
    seconds.max(0.0)
}
