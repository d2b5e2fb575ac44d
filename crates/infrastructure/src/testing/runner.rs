//! Suite runner.
//!
//! Runs scenarios one after another and aggregates their reports.

use std::sync::Arc;
use std::time::Instant;

use gridcheck_application::ports::HttpClient;
use gridcheck_application::{ExecuteRequest, RunScenario};
use gridcheck_domain::{RunnerConfig, Scenario, SuiteReport};

/// Runs a list of scenarios against the grid.
///
/// A failing scenario does not stop the suite; within a scenario the first
/// failing assertion does.
pub struct SuiteRunner<C: HttpClient> {
    scenario: RunScenario<C>,
    filter: Option<String>,
}

impl<C: HttpClient> SuiteRunner<C> {
    /// Create a runner using the config's timeout and log flags.
    pub fn new(client: Arc<C>, config: &RunnerConfig) -> Self {
        Self {
            scenario: RunScenario::new(ExecuteRequest::with_config(client, config)),
            filter: None,
        }
    }

    /// Only run scenarios whose name contains `filter`.
    #[must_use]
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        let filter = filter.into();
        self.filter = (!filter.is_empty()).then_some(filter);
        self
    }

    /// Returns true if the scenario passes the name filter.
    #[must_use]
    pub fn selects(&self, scenario: &Scenario) -> bool {
        self.filter
            .as_deref()
            .is_none_or(|needle| scenario.name.contains(needle))
    }

    /// Run every selected scenario in order.
    pub async fn run(&self, scenarios: &[Scenario]) -> SuiteReport {
        let start = Instant::now();
        let mut reports = Vec::with_capacity(scenarios.len());

        for scenario in scenarios.iter().filter(|s| self.selects(s)) {
            tracing::debug!(scenario = %scenario.name, "running");
            reports.push(self.scenario.report(scenario).await);
        }

        let report = SuiteReport::new(reports, start.elapsed());
        tracing::info!(
            total = report.total,
            passed = report.passed,
            failed = report.failed,
            duration_ms = report.duration_ms,
            "suite finished"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use async_trait::async_trait;
    use gridcheck_application::ports::HttpClientError;
    use gridcheck_domain::{Headers, PreparedRequest, ResponseCapture};
    use pretty_assertions::assert_eq;

    use crate::fixtures::{STATUS_SNAPSHOT, grid_scenarios};

    /// Answers like a healthy grid that accepts `user1:1234`.
    struct FakeGrid;

    #[async_trait]
    impl HttpClient for FakeGrid {
        async fn execute(
            &self,
            request: &PreparedRequest,
            _timeout: Duration,
        ) -> Result<ResponseCapture, HttpClientError> {
            let (status, body) = match request.url.path() {
                "/status" => (200, STATUS_SNAPSHOT),
                "/wd/hub/status" => match request.authorization().as_deref() {
                    Some("Basic dXNlcjE6MTIzNA==") => {
                        (200, r#"{"value":{"message":"Selenoid 1.11.3","ready":true}}"#)
                    }
                    _ => (401, "Unauthorized"),
                },
                _ => (404, "Not Found"),
            };
            Ok(ResponseCapture::new(
                status,
                Headers::new(),
                body.as_bytes(),
                Duration::from_millis(1),
            ))
        }
    }

    fn config() -> RunnerConfig {
        RunnerConfig::new("http://grid.test")
    }

    #[tokio::test]
    async fn test_grid_fixtures_pass() {
        let runner = SuiteRunner::new(Arc::new(FakeGrid), &config());
        let report = runner.run(&grid_scenarios(&config())).await;

        let failures: Vec<_> = report.failures().map(|r| r.name.clone()).collect();
        assert_eq!(failures, Vec::<String>::new());
        assert!(report.all_passed());
        assert_eq!(report.total, grid_scenarios(&config()).len());
    }

    #[tokio::test]
    async fn test_failure_does_not_stop_suite() {
        let mut config = config();
        config.fleet_size = 5;
        let runner = SuiteRunner::new(Arc::new(FakeGrid), &config);

        let report = runner.run(&grid_scenarios(&config)).await;

        assert!(!report.all_passed());
        assert_eq!(report.total, grid_scenarios(&config).len());
        let failed = report
            .scenarios
            .iter()
            .find(|r| r.name == "status-total")
            .unwrap();
        assert_eq!(failed.failure.as_ref().unwrap().kind, "mismatch");
        assert!(
            report
                .scenarios
                .iter()
                .any(|r| r.name == "wd-hub-basic-auth" && r.passed())
        );
    }

    #[tokio::test]
    async fn test_filter() {
        let runner = SuiteRunner::new(Arc::new(FakeGrid), &config()).with_filter("wd-hub");
        let report = runner.run(&grid_scenarios(&config())).await;

        assert_eq!(report.total, 3);
        assert!(report.scenarios.iter().all(|r| r.name.starts_with("wd-hub")));
    }

    #[tokio::test]
    async fn test_empty_filter_selects_all() {
        let runner = SuiteRunner::new(Arc::new(FakeGrid), &config()).with_filter("");
        let scenarios = grid_scenarios(&config());
        assert!(scenarios.iter().all(|s| runner.selects(s)));
    }
}
