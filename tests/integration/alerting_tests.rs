//! Alerting integration tests
//!
//! Tests alert delivery to Slack and generic webhooks.

#[cfg(test)]
mod tests {
    use crate::common::{accepting_server, wait_for_requests};
    use chrono::{Duration, Utc};
    use litellm_hooks::config::AlertingConfig;
    use litellm_hooks::core::types::{CallParameters, CallerContext, HookException, Message};
    use litellm_hooks::monitoring::alerts::{AlertingEngine, AlertingUpdate};
    use litellm_hooks::monitoring::{AlertSeverity, AlertType, AlertingChannel};
    use std::time::Duration as StdDuration;
    use wiremock::MockServer;

    fn slack_config(server: &MockServer) -> AlertingConfig {
        AlertingConfig {
            channels: vec![AlertingChannel::Slack],
            slack_webhook: Some(format!("{}/slack", server.uri())),
            ..Default::default()
        }
    }

    fn slack_text(request: &wiremock::Request) -> String {
        let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
        body["text"].as_str().unwrap().to_string()
    }

    // ==================== Failure Hook Tests ====================

    /// Test a provider exception reaches Slack
    #[tokio::test]
    async fn test_provider_exception_alert() {
        let server = accepting_server("/slack").await;
        let mut config = slack_config(&server);
        config.alert_types = vec![AlertType::LlmExceptions];
        let engine = AlertingEngine::from_config(&config).unwrap();

        let exception =
            HookException::provider(500, "openai", "gpt-3.5-turbo", "This is a test exception");
        let decision = engine.post_call_failure_hook(&exception, &CallerContext::default());
        assert!(decision.is_dispatched());

        let requests = wait_for_requests(&server, 1).await;
        assert_eq!(requests.len(), 1);

        let text = slack_text(&requests[0]);
        assert!(text.starts_with("Level: `High`\nTimestamp: `"));
        assert!(text.contains("Message: LLM API call failed: "));
        assert!(text.contains("This is a test exception"));
    }

    /// Test a gateway-side exception never reaches Slack
    #[tokio::test]
    async fn test_host_exception_not_alerted() {
        let server = accepting_server("/slack").await;
        let mut config = slack_config(&server);
        config.alert_types = vec![AlertType::LlmExceptions];
        let engine = AlertingEngine::from_config(&config).unwrap();

        let exception =
            HookException::host(400, serde_json::json!({"error": "this is a test exception"}));
        let decision = engine.post_call_failure_hook(&exception, &CallerContext::default());
        assert!(!decision.is_dispatched());

        tokio::time::sleep(StdDuration::from_millis(200)).await;
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    /// Test nothing is sent while alerting is disabled
    #[tokio::test]
    async fn test_no_alert_when_disabled() {
        let server = accepting_server("/slack").await;
        let engine = AlertingEngine::from_config(&AlertingConfig {
            slack_webhook: Some(format!("{}/slack", server.uri())),
            ..Default::default()
        })
        .unwrap();

        let exception = HookException::provider(500, "openai", "gpt-4", "boom");
        assert!(!engine
            .post_call_failure_hook(&exception, &CallerContext::default())
            .is_dispatched());

        tokio::time::sleep(StdDuration::from_millis(200)).await;
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    // ==================== Latency Tests ====================

    /// Test a slow response produces the latency alert text
    #[tokio::test]
    async fn test_slow_response_alert() {
        let server = accepting_server("/slack").await;
        let mut config = slack_config(&server);
        config.threshold_seconds = Some(100.0);
        config.alert_types = vec![AlertType::LlmTooSlow];
        config.proxy_base_url = Some("https://proxy.example.com".to_string());
        let engine = AlertingEngine::from_config(&config).unwrap();

        let call = CallParameters::new("chatgpt-v-2", vec![Message::user("Hey how's it going?")]);
        let start = Utc::now();
        let decision = engine.response_latency_check(&call, start, start + Duration::seconds(150));
        assert!(decision.is_dispatched());

        let requests = wait_for_requests(&server, 1).await;
        let text = slack_text(&requests[0]);

        assert!(text.starts_with("Level: `Low`"));
        assert!(text.contains("150.0s"));
        assert!(text.contains("Alerting threshold: 100s"));
        assert!(text.contains("Request Model: `chatgpt-v-2`"));
        assert!(text.ends_with("\n\nProxy URL: `https://proxy.example.com`"));
    }

    /// Test update_values takes effect for the next call
    #[tokio::test]
    async fn test_update_values_visible_to_next_call() {
        let server = accepting_server("/slack").await;
        let mut config = slack_config(&server);
        config.alert_types = vec![AlertType::LlmTooSlow];
        let engine = AlertingEngine::from_config(&config).unwrap();

        let call = CallParameters::new("gpt-4", vec![Message::user("hello")]);
        let start = Utc::now();
        let end = start + Duration::seconds(30);

        assert!(!engine.response_latency_check(&call, start, end).is_dispatched());

        engine.update_values(AlertingUpdate::new().alerting_threshold(10.0));
        assert!(engine.response_latency_check(&call, start, end).is_dispatched());

        assert_eq!(wait_for_requests(&server, 1).await.len(), 1);
    }

    // ==================== Fan-out Tests ====================

    /// Test every enabled channel receives the alert
    #[tokio::test]
    async fn test_fan_out_to_slack_and_webhook() {
        let slack = accepting_server("/slack").await;
        let webhook = accepting_server("/alerts").await;

        let config = AlertingConfig {
            channels: vec![AlertingChannel::Slack, AlertingChannel::Webhook],
            slack_webhook: Some(format!("{}/slack", slack.uri())),
            webhook_url: Some(format!("{}/alerts", webhook.uri())),
            ..Default::default()
        };
        let engine = AlertingEngine::from_config(&config).unwrap();

        let event =
            engine.alerting_handler("budget exceeded", AlertSeverity::Medium, AlertType::BudgetAlerts);

        assert_eq!(wait_for_requests(&slack, 1).await.len(), 1);
        let requests = wait_for_requests(&webhook, 1).await;
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();

        assert_eq!(body["id"], event.id.to_string());
        assert_eq!(body["level"], "Medium");
        assert_eq!(body["alert_type"], "budget_alerts");
        assert_eq!(body["message"], "budget exceeded");
        assert!(body["timestamp"].is_string());
    }

    /// Test an unreachable channel does not stop delivery to the others
    #[tokio::test]
    async fn test_unreachable_channel_is_isolated() {
        let webhook = accepting_server("/alerts").await;

        let config = AlertingConfig {
            channels: vec![AlertingChannel::Slack, AlertingChannel::Webhook],
            slack_webhook: Some("http://127.0.0.1:9/slack".to_string()),
            webhook_url: Some(format!("{}/alerts", webhook.uri())),
            timeout_secs: 1,
            ..Default::default()
        };
        let engine = AlertingEngine::from_config(&config).unwrap();

        engine.alerting_handler("still delivered", AlertSeverity::Low, AlertType::LlmTooSlow);

        assert_eq!(wait_for_requests(&webhook, 1).await.len(), 1);
    }
}
