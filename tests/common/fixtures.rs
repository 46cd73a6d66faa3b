//! Test fixtures and data factories
//!
//! Provides factory methods for creating test data with sensible defaults.
//! All factories create real objects, not mocks.

use chrono::{Duration, Utc};
use litellm_hooks::core::types::{
    CallOutcome, CallParameters, CallResult, ErrorPayload, Message, ModelResponse, Usage,
};
use std::time::Duration as StdDuration;
use wiremock::MockServer;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

/// Factory for creating completed call outcomes
pub struct OutcomeFactory;

impl OutcomeFactory {
    /// Successful call that took `seconds`
    pub fn success(model: &str, seconds: i64) -> CallOutcome {
        let start = Utc::now();
        CallOutcome {
            call: CallParameters::new(model, vec![Message::user("Hey how's it going?")]),
            start_time: start,
            end_time: start + Duration::seconds(seconds),
            usage: Usage::new(10, 5),
            result: CallResult::Success(ModelResponse {
                model: model.to_string(),
                content: "I'm doing well, thank you!".to_string(),
            }),
        }
    }

    /// Failed call with a provider error payload
    pub fn failure(model: &str) -> CallOutcome {
        let mut outcome = Self::success(model, 1);
        outcome.result = CallResult::Failure(ErrorPayload {
            model: model.to_string(),
            error: serde_json::json!({
                "type": "rate_limit_error",
                "message": "Rate limit reached"
            }),
        });
        outcome
    }
}

/// Start a mock server accepting POSTs on `route`
pub async fn accepting_server(route: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    server
}

/// Wait until the server has received at least `count` requests.
///
/// Returns the requests seen when the count is reached or after two seconds.
pub async fn wait_for_requests(server: &MockServer, count: usize) -> Vec<wiremock::Request> {
    let deadline = tokio::time::Instant::now() + StdDuration::from_secs(2);

    loop {
        let requests = server.received_requests().await.unwrap_or_default();
        if requests.len() >= count || tokio::time::Instant::now() >= deadline {
            return requests;
        }
        tokio::time::sleep(StdDuration::from_millis(20)).await;
    }
}
