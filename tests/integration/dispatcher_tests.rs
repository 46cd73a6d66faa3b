//! Hook dispatcher integration tests
//!
//! Tests the full post-call path from configuration to HTTP delivery.

#[cfg(test)]
mod tests {
    use crate::common::{OutcomeFactory, accepting_server, wait_for_requests};
    use litellm_hooks::{AlertingUpdate, CallerContext, Config, HookDispatcher, HookException};
    use std::time::{Duration, Instant};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn slow_collector(delay: Duration) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/spend"))
            .respond_with(ResponseTemplate::new(200).set_delay(delay))
            .mount(&server)
            .await;
        server
    }

    fn config_yaml(collector: &str, slack: &str) -> String {
        format!(
            r#"
billing:
  enabled: true
  collector_url: "{collector}/spend"
  account_id: "acct-e2e"
alerting:
  channels: [slack]
  threshold_seconds: 60
  alert_types: [llm_exceptions, llm_too_slow]
  slack_webhook: "{slack}/slack"
"#
        )
    }

    /// Test a slow call is both billed and alerted
    #[tokio::test]
    async fn test_post_call_hook_bills_and_alerts() {
        let collector = accepting_server("/spend").await;
        let slack = accepting_server("/slack").await;
        let config = Config::from_yaml_str(&config_yaml(&collector.uri(), &slack.uri())).unwrap();
        let dispatcher = HookDispatcher::from_config(&config).await.unwrap();

        let decision = dispatcher.post_call_hook(OutcomeFactory::success("gpt-4", 90));
        assert!(decision.is_dispatched());

        let spend = wait_for_requests(&collector, 1).await;
        assert_eq!(spend.len(), 1);
        let body: serde_json::Value = serde_json::from_slice(&spend[0].body).unwrap();
        assert_eq!(body[0]["account_id"], "acct-e2e");
        assert_eq!(body[0]["response_time"], 90.0);

        assert_eq!(wait_for_requests(&slack, 1).await.len(), 1);
    }

    /// Test a fast call is billed without alerting
    #[tokio::test]
    async fn test_post_call_hook_fast_call() {
        let collector = accepting_server("/spend").await;
        let slack = accepting_server("/slack").await;
        let config = Config::from_yaml_str(&config_yaml(&collector.uri(), &slack.uri())).unwrap();
        let dispatcher = HookDispatcher::from_config(&config).await.unwrap();

        assert!(!dispatcher.post_call_hook(OutcomeFactory::success("gpt-4", 3)).is_dispatched());

        assert_eq!(wait_for_requests(&collector, 1).await.len(), 1);
        assert!(slack.received_requests().await.unwrap().is_empty());
    }

    /// Test failure hook classification through the dispatcher
    #[tokio::test]
    async fn test_post_call_failure_hook() {
        let collector = accepting_server("/spend").await;
        let slack = accepting_server("/slack").await;
        let config = Config::from_yaml_str(&config_yaml(&collector.uri(), &slack.uri())).unwrap();
        let dispatcher = HookDispatcher::from_config(&config).await.unwrap();

        let caller = CallerContext {
            key_alias: Some("team-key".to_string()),
            ..Default::default()
        };
        assert!(!dispatcher
            .post_call_failure_hook(
                HookException::host(401, serde_json::json!({"error": "invalid key"})),
                &caller,
            )
            .is_dispatched());
        assert!(dispatcher
            .post_call_failure_hook(
                HookException::provider(503, "azure", "gpt-35-turbo", "service unavailable"),
                &caller,
            )
            .is_dispatched());

        assert_eq!(wait_for_requests(&slack, 1).await.len(), 1);
        assert!(collector.received_requests().await.unwrap().is_empty());
    }

    /// Test disabling alert types at runtime through the dispatcher
    #[tokio::test]
    async fn test_update_values_through_dispatcher() {
        let collector = accepting_server("/spend").await;
        let slack = accepting_server("/slack").await;
        let config = Config::from_yaml_str(&config_yaml(&collector.uri(), &slack.uri())).unwrap();
        let dispatcher = HookDispatcher::from_config(&config).await.unwrap();

        dispatcher.update_values(AlertingUpdate::new().alert_types(vec![]));

        let decision = dispatcher.post_call_failure_hook(
            HookException::provider(500, "openai", "gpt-4", "boom"),
            &CallerContext::default(),
        );
        assert!(!decision.is_dispatched());
    }

    /// Test drain returns once the in-flight report completes
    #[tokio::test]
    async fn test_drain_waits_for_in_flight_report() {
        let collector = slow_collector(Duration::from_millis(300)).await;
        let slack = accepting_server("/slack").await;
        let config = Config::from_yaml_str(&config_yaml(&collector.uri(), &slack.uri())).unwrap();
        let dispatcher = HookDispatcher::from_config(&config).await.unwrap();

        dispatcher.post_call_hook(OutcomeFactory::success("gpt-4", 1));

        let started = Instant::now();
        assert!(dispatcher.drain(Duration::from_secs(10)).await);
        assert!(started.elapsed() < Duration::from_secs(5));
        assert_eq!(collector.received_requests().await.unwrap().len(), 1);
    }

    /// Test drain gives up at the deadline when a delivery is stuck
    #[tokio::test]
    async fn test_drain_deadline() {
        let collector = slow_collector(Duration::from_secs(3)).await;
        let slack = accepting_server("/slack").await;
        let config = Config::from_yaml_str(&config_yaml(&collector.uri(), &slack.uri())).unwrap();
        let dispatcher = HookDispatcher::from_config(&config).await.unwrap();

        dispatcher.post_call_hook(OutcomeFactory::success("gpt-4", 1));

        assert!(!dispatcher.drain(Duration::from_millis(200)).await);
    }
}
