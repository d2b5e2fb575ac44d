//! Run Scenario Use Case
//!
//! Executes a scenario's request, then evaluates its assertions in order.
//! The first failing assertion ends the scenario.

use std::time::Instant;

use gridcheck_domain::{ResponseCapture, Scenario, ScenarioReport};

use super::ExecuteRequest;
use crate::ports::HttpClient;
use crate::{ApplicationError, ApplicationResult};

/// Use case for running one scenario against the grid.
pub struct RunScenario<C: HttpClient> {
    execute: ExecuteRequest<C>,
}

impl<C: HttpClient> RunScenario<C> {
    /// Creates the use case on top of a configured `ExecuteRequest`.
    pub const fn new(execute: ExecuteRequest<C>) -> Self {
        Self { execute }
    }

    /// Runs the scenario, returning the capture when every assertion passes.
    ///
    /// # Errors
    ///
    /// Returns the first error met: invalid request, network failure, or the
    /// first failing assertion.
    pub async fn run(&self, scenario: &Scenario) -> ApplicationResult<ResponseCapture> {
        self.evaluate(scenario).await.map_err(|halt| halt.error)
    }

    /// Runs the scenario and folds the outcome into a report.
    pub async fn report(&self, scenario: &Scenario) -> ScenarioReport {
        let start = Instant::now();

        match self.evaluate(scenario).await {
            Ok(capture) => {
                tracing::info!(
                    scenario = %scenario.name,
                    status = capture.status,
                    "scenario passed"
                );
                ScenarioReport::pass(
                    &scenario.name,
                    capture.status,
                    scenario.assertions.len(),
                    start.elapsed(),
                )
            }
            Err(halt) => {
                tracing::warn!(
                    scenario = %scenario.name,
                    kind = halt.error.kind(),
                    error = %halt.error,
                    "scenario failed"
                );
                ScenarioReport::fail(
                    &scenario.name,
                    halt.status,
                    halt.passed,
                    halt.error.to_failure(),
                    start.elapsed(),
                )
            }
        }
    }

    async fn evaluate(&self, scenario: &Scenario) -> Result<ResponseCapture, Halt> {
        let capture = self
            .execute
            .execute(&scenario.request)
            .await
            .map_err(|error| Halt {
                status: None,
                passed: 0,
                error,
            })?;

        for (passed, assertion) in scenario.assertions.iter().enumerate() {
            assertion.evaluate(&capture).map_err(|e| Halt {
                status: Some(capture.status),
                passed,
                error: ApplicationError::from(e),
            })?;
            tracing::debug!(
                scenario = %scenario.name,
                assertion = %assertion.description(),
                "passed"
            );
        }
        Ok(capture)
    }
}

/// Where and why a scenario stopped.
struct Halt {
    status: Option<u16>,
    passed: usize,
    error: ApplicationError,
}
