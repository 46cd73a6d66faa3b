//! Slow-response details and message formatting

use crate::config::LangfuseConfig;
use crate::core::types::{CallParameters, ProviderParams, elapsed_seconds};
use chrono::{DateTime, Utc};

/// What a slow-response alert reports about the call
#[derive(Debug, Clone, PartialEq)]
pub struct SlowResponse {
    /// Seconds between start and end
    pub elapsed: f64,
    /// Deployment model, after alias resolution
    pub model: String,
    /// Upstream endpoint, empty when it cannot be determined
    pub api_base: String,
    /// Rendered request messages (or embedding input)
    pub messages: String,
    /// Trace link, when a trace viewer is configured
    pub trace_url: Option<String>,
}

impl SlowResponse {
    /// Build the alert text for a response slower than `threshold` seconds
    pub fn alert_message(&self, threshold: f64) -> String {
        let mut message = format!(
            "`Responses are slow - {}s response time > Alerting threshold: {}s`\nRequest Model: `{}`\nAPI Base: `{}`\nMessages: `{}`",
            format_seconds(self.elapsed),
            threshold,
            self.model,
            self.api_base,
            self.messages
        );

        if let Some(trace_url) = &self.trace_url {
            message.push_str(&format!("\nLangfuse Trace: {}", trace_url));
        }

        message
    }
}

/// Gather the slow-response fields of a call
pub fn slow_response_details(
    call: &CallParameters,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    langfuse: Option<&LangfuseConfig>,
) -> SlowResponse {
    let params = &call.params;

    let model = params
        .model_alias_map
        .get(&call.model)
        .cloned()
        .unwrap_or_else(|| call.model.clone());

    SlowResponse {
        elapsed: elapsed_seconds(start_time, end_time),
        api_base: resolve_api_base(&model, params),
        model,
        messages: render_messages(call),
        trace_url: langfuse.and_then(|lf| trace_id(params).map(|id| lf.trace_url(&id))),
    }
}

/// Upstream endpoint of a call.
///
/// Checked in order: the explicit `api_base`, the Vertex endpoint derived
/// from project and location, the proxied request body, the proxied URL.
pub fn resolve_api_base(model: &str, params: &ProviderParams) -> String {
    if let Some(api_base) = params.api_base.as_deref().filter(|s| !s.is_empty()) {
        return api_base.to_string();
    }

    if let (Some(project), Some(location)) = (&params.vertex_project, &params.vertex_location) {
        return format!(
            "https://{location}-aiplatform.googleapis.com/v1/projects/{project}/locations/{location}/publishers/google/models/{model}"
        );
    }

    if let Some(request) = &params.proxy_server_request {
        if let Some(api_base) = request.body.get("api_base").and_then(|v| v.as_str()) {
            return api_base.to_string();
        }
        if let Some(url) = &request.url {
            return url.clone();
        }
    }

    String::new()
}

/// Render seconds rounded to two decimals, keeping one decimal for whole values
pub fn format_seconds(seconds: f64) -> String {
    let rounded = (seconds * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        format!("{:.1}", rounded)
    } else {
        format!("{}", rounded)
    }
}

fn render_messages(call: &CallParameters) -> String {
    if call.messages.is_empty() {
        if let Some(input) = &call.input {
            return input.to_string();
        }
    }

    serde_json::to_string(&call.messages).unwrap_or_else(|_| "[]".to_string())
}

fn trace_id(params: &ProviderParams) -> Option<String> {
    params
        .metadata
        .as_ref()
        .and_then(|metadata| metadata.get("trace_id"))
        .and_then(|id| id.as_str())
        .map(str::to_string)
        .or_else(|| params.call_id.clone())
}
