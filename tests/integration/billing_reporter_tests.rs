//! Billing reporter integration tests
//!
//! Tests spend records as the collector receives them.

#[cfg(test)]
mod tests {
    use crate::common::{OutcomeFactory, accepting_server, wait_for_requests};
    use litellm_hooks::services::billing::{AccountContext, BillingReporter};
    use litellm_hooks::services::pricing::{CostCalculator, UnknownModelPolicy};
    use std::time::Duration;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn reporter(server: &MockServer, calculator: CostCalculator) -> BillingReporter {
        BillingReporter::new(
            format!("{}/spend", server.uri()),
            AccountContext::new(Some("acct-123".to_string())),
            calculator,
            Duration::from_secs(5),
        )
        .unwrap()
    }

    // ==================== Record Delivery Tests ====================

    /// Test a successful call is posted as a one-element JSON array
    #[tokio::test]
    async fn test_success_record_delivery() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/spend"))
            .and(header("content-type", "application/json"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let reporter = reporter(&server, CostCalculator::default());
        reporter.report(OutcomeFactory::success("gpt-3.5-turbo", 2));

        let requests = wait_for_requests(&server, 1).await;
        assert_eq!(requests.len(), 1);

        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        let records = body.as_array().unwrap();
        assert_eq!(records.len(), 1);

        let record = &records[0];
        assert_eq!(record["model_id"], "gpt-3.5-turbo");
        assert_eq!(record["account_id"], "acct-123");
        assert_eq!(record["response"], "I'm doing well, thank you!");
        assert_eq!(record["response_time"], 2.0);
        assert!((record["total_cost"].as_f64().unwrap() - 0.000025).abs() < 1e-12);
        assert!(record.get("error").is_none());
    }

    /// Test a failed call carries the error payload instead of a response
    #[tokio::test]
    async fn test_failure_record_delivery() {
        let server = accepting_server("/spend").await;
        let reporter = reporter(&server, CostCalculator::default());

        reporter.log_event(&OutcomeFactory::failure("claude-2")).await;

        let requests = wait_for_requests(&server, 1).await;
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(body[0]["error"]["type"], "rate_limit_error");
        assert!(body[0].get("response").is_none());
    }

    /// Test duration-billed models are priced by runtime
    #[tokio::test]
    async fn test_duration_billed_record() {
        let server = accepting_server("/spend").await;
        let reporter = reporter(&server, CostCalculator::default());

        reporter
            .log_event(&OutcomeFactory::success("replicate/llama-2-70b-chat", 10))
            .await;

        let requests = wait_for_requests(&server, 1).await;
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert!((body[0]["total_cost"].as_f64().unwrap() - 0.032).abs() < 1e-9);
    }

    // ==================== Failure Isolation Tests ====================

    /// Test a collector error is swallowed and not retried
    #[tokio::test]
    async fn test_collector_error_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/spend"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let reporter = reporter(&server, CostCalculator::default());
        reporter.log_event(&OutcomeFactory::success("gpt-4", 1)).await;

        tokio::time::sleep(Duration::from_millis(200)).await;
        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
    }

    /// Test an unpriceable model sends nothing under the reject policy
    #[tokio::test]
    async fn test_rejected_model_sends_nothing() {
        let server = accepting_server("/spend").await;
        let reporter = reporter(
            &server,
            CostCalculator::default().with_unknown_model_policy(UnknownModelPolicy::Reject),
        );

        reporter.log_event(&OutcomeFactory::success("mystery-model", 1)).await;

        let requests = server.received_requests().await.unwrap();
        assert!(requests.is_empty());
    }

    /// Test the request path is not held up by a slow collector
    #[tokio::test]
    async fn test_report_does_not_wait_for_collector() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/spend"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(1)))
            .mount(&server)
            .await;

        let reporter = reporter(&server, CostCalculator::default());
        let started = std::time::Instant::now();
        reporter.report(OutcomeFactory::success("gpt-4", 1));

        assert!(started.elapsed() < Duration::from_millis(100));
        assert_eq!(wait_for_requests(&server, 1).await.len(), 1);
    }
}
