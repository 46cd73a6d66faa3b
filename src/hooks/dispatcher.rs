//! Gateway-facing post-call hooks

use crate::config::Config;
use crate::core::types::{CallOutcome, CallerContext, HookException};
use crate::monitoring::alerts::{AlertDecision, AlertingEngine, AlertingUpdate};
use crate::services::billing::BillingReporter;
use crate::services::pricing::{CostCalculator, PricingTable};
use crate::utils::error::Result;
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Entry points the gateway calls once an upstream call is over.
///
/// Every method returns without awaiting network I/O; billing reports and
/// alert deliveries run on detached tasks.
#[derive(Debug, Clone)]
pub struct HookDispatcher {
    billing: Option<BillingReporter>,
    alerting: Arc<AlertingEngine>,
}

impl HookDispatcher {
    pub fn new(billing: Option<BillingReporter>, alerting: Arc<AlertingEngine>) -> Self {
        Self { billing, alerting }
    }

    /// Wire the pricing table, reporter and alerting engine from configuration
    pub async fn from_config(config: &Config) -> Result<Self> {
        let billing = if config.billing.enabled {
            let table = match &config.billing.pricing_file {
                Some(path) => Arc::new(PricingTable::from_file(path).await?),
                None => PricingTable::builtin(),
            };
            let calculator = CostCalculator::new(table)
                .with_unknown_model_policy(config.billing.unknown_model_policy);
            info!(
                models = calculator.table().len(),
                unknown_model_policy = ?calculator.unknown_model_policy(),
                "Pricing table ready"
            );
            Some(BillingReporter::from_config(&config.billing, calculator)?)
        } else {
            debug!("Billing disabled");
            None
        };

        let alerting = Arc::new(AlertingEngine::from_config(&config.alerting)?);

        Ok(Self::new(billing, alerting))
    }

    pub fn billing(&self) -> Option<&BillingReporter> {
        self.billing.as_ref()
    }

    pub fn alerting(&self) -> &AlertingEngine {
        &self.alerting
    }

    /// Replace the alerting configuration for all later hook calls
    pub fn update_values(&self, update: AlertingUpdate) {
        self.alerting.update_values(update);
    }

    /// Report spend and check latency for a completed call
    pub fn post_call_hook(&self, outcome: CallOutcome) -> AlertDecision {
        let decision =
            self.alerting
                .response_latency_check(&outcome.call, outcome.start_time, outcome.end_time);

        if let Some(billing) = &self.billing {
            billing.report(outcome);
        }

        decision
    }

    /// Alert on an exception raised before or during the upstream call
    pub fn post_call_failure_hook(
        &self,
        exception: HookException,
        caller: &CallerContext,
    ) -> AlertDecision {
        self.alerting.post_call_failure_hook(&exception, caller)
    }

    /// Wait for in-flight reports and alerts, at most `timeout`.
    ///
    /// Returns `false` if deliveries were still running at the deadline.
    /// Meant for shutdown: tasks spawned afterwards are tracked but the
    /// trackers stay closed.
    pub async fn drain(&self, timeout: Duration) -> bool {
        let trackers: Vec<_> = self
            .billing
            .iter()
            .map(|billing| billing.tasks())
            .chain(std::iter::once(self.alerting.tasks()))
            .collect();

        let waits = trackers.iter().map(|tasks| {
            tasks.close();
            tasks.wait()
        });
        tokio::time::timeout(timeout, join_all(waits)).await.is_ok()
    }
}
