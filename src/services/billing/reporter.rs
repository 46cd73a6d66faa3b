//! Best-effort spend reporting to the billing collector

use super::record::{AccountContext, BillingRecord};
use crate::config::BillingConfig;
use crate::core::types::CallOutcome;
use crate::services::pricing::CostCalculator;
use crate::utils::error::{GatewayError, Result};
use reqwest::header::CONTENT_TYPE;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::task::TaskTracker;
use tracing::{debug, warn};

/// Posts one cost record per completed call.
///
/// Delivery is at most once: nothing is retried and every failure ends in a
/// log line. Callers never observe an error.
#[derive(Debug, Clone)]
pub struct BillingReporter {
    client: reqwest::Client,
    collector_url: Arc<str>,
    account: Arc<AccountContext>,
    calculator: CostCalculator,
    tasks: TaskTracker,
}

impl BillingReporter {
    /// Create a new reporter
    pub fn new(
        collector_url: impl Into<String>,
        account: AccountContext,
        calculator: CostCalculator,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            collector_url: Arc::from(collector_url.into()),
            account: Arc::new(account),
            calculator,
            tasks: TaskTracker::new(),
        })
    }

    /// Create a reporter from the billing section of the configuration
    pub fn from_config(config: &BillingConfig, calculator: CostCalculator) -> Result<Self> {
        Self::new(
            config.collector_url.clone(),
            AccountContext::new(config.account_id.clone()),
            calculator,
            Duration::from_secs(config.timeout_secs),
        )
    }

    pub fn account(&self) -> &AccountContext {
        &self.account
    }

    pub fn collector_url(&self) -> &str {
        &self.collector_url
    }

    /// Reports still being delivered
    pub fn tasks(&self) -> &TaskTracker {
        &self.tasks
    }

    /// Fire-and-forget report on a detached task.
    ///
    /// Must not block the request path, so outside a tokio runtime the record
    /// is dropped with a warning.
    pub fn report(&self, outcome: CallOutcome) {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            warn!(
                model = %outcome.call.model,
                "No async runtime available, dropping billing record"
            );
            return;
        };

        let reporter = self.clone();
        self.tasks.spawn_on(
            async move {
                reporter.log_event(&outcome).await;
            },
            &handle,
        );
    }

    /// Build and send the record, logging any failure
    pub async fn log_event(&self, outcome: &CallOutcome) {
        debug!(model = %outcome.call.model, "Billing report entering for completed call");

        if let Err(e) = self.try_log_event(outcome).await {
            warn!(
                model = %outcome.call.model,
                collector = %self.collector_url,
                transport = e.is_transport(),
                error = %e,
                "Billing report failed"
            );
        }
    }

    /// Price the call and wrap it in the collector record
    pub fn build_record(&self, outcome: &CallOutcome) -> Result<BillingRecord> {
        let cost = self.calculator.compute_cost(
            &outcome.call.model,
            &outcome.usage,
            outcome.start_time,
            outcome.end_time,
        )?;

        Ok(BillingRecord::from_outcome(
            outcome,
            cost.total_cost(),
            &self.account,
        ))
    }

    async fn try_log_event(&self, outcome: &CallOutcome) -> Result<()> {
        let record = self.build_record(outcome)?;
        let body = serde_json::to_vec(&[&record])?;
        debug!(
            model_id = %record.model_id,
            total_cost = record.total_cost,
            "Billing final data object built"
        );

        let response = self
            .client
            .post(self.collector_url.as_ref())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| GatewayError::network(format!("Failed to reach billing collector: {}", e)))?;

        if !response.status().is_success() {
            return Err(GatewayError::network(format!(
                "Billing collector returned status: {}",
                response.status()
            )));
        }

        Ok(())
    }
}
