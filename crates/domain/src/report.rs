//! Outcomes of scenario runs.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Why a scenario failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    /// Error category (`network`, `body-parse`, `invalid-path`,
    /// `path-not-found`, `mismatch`, `invalid-request`).
    pub kind: String,
    /// Diagnostic message.
    pub message: String,
}

/// Result of running one scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioReport {
    /// Scenario name.
    pub name: String,
    /// Status code received, if a response arrived.
    pub status: Option<u16>,
    /// Number of assertions that passed before the run ended.
    pub assertions_passed: usize,
    /// Failure, if any.
    pub failure: Option<Failure>,
    /// Wall-clock time for the scenario in milliseconds.
    pub duration_ms: u64,
}

impl ScenarioReport {
    /// Creates a passing report.
    #[must_use]
    pub fn pass(
        name: impl Into<String>,
        status: u16,
        assertions: usize,
        duration: Duration,
    ) -> Self {
        Self {
            name: name.into(),
            status: Some(status),
            assertions_passed: assertions,
            failure: None,
            duration_ms: millis(duration),
        }
    }

    /// Creates a failing report.
    #[must_use]
    pub fn fail(
        name: impl Into<String>,
        status: Option<u16>,
        assertions_passed: usize,
        failure: Failure,
        duration: Duration,
    ) -> Self {
        Self {
            name: name.into(),
            status,
            assertions_passed,
            failure: Some(failure),
            duration_ms: millis(duration),
        }
    }

    /// Returns true if the scenario passed.
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.failure.is_none()
    }
}

/// Results of running a list of scenarios.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuiteReport {
    /// Per-scenario results in run order.
    pub scenarios: Vec<ScenarioReport>,
    /// Number of scenarios run.
    pub total: usize,
    /// Number of passing scenarios.
    pub passed: usize,
    /// Number of failing scenarios.
    pub failed: usize,
    /// Execution time in milliseconds.
    pub duration_ms: u64,
}

impl SuiteReport {
    /// Builds the summary from individual reports.
    #[must_use]
    pub fn new(scenarios: Vec<ScenarioReport>, duration: Duration) -> Self {
        let total = scenarios.len();
        let passed = scenarios.iter().filter(|s| s.passed()).count();

        Self {
            scenarios,
            total,
            passed,
            failed: total - passed,
            duration_ms: millis(duration),
        }
    }

    /// Check if all scenarios passed.
    #[must_use]
    pub const fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Returns the failing scenarios.
    pub fn failures(&self) -> impl Iterator<Item = &ScenarioReport> {
        self.scenarios.iter().filter(|s| !s.passed())
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suite_report_counts() {
        let reports = vec![
            ScenarioReport::pass("total", 200, 2, Duration::from_millis(10)),
            ScenarioReport::fail(
                "wd hub",
                Some(200),
                0,
                Failure {
                    kind: "mismatch".to_string(),
                    message: "expected status 401, got 200".to_string(),
                },
                Duration::from_millis(12),
            ),
        ];

        let suite = SuiteReport::new(reports, Duration::from_millis(25));
        assert_eq!(suite.total, 2);
        assert_eq!(suite.passed, 1);
        assert_eq!(suite.failed, 1);
        assert!(!suite.all_passed());
        assert_eq!(suite.failures().count(), 1);
        assert_eq!(suite.duration_ms, 25);
    }

    #[test]
    fn test_empty_suite_passes() {
        let suite = SuiteReport::new(Vec::new(), Duration::ZERO);
        assert!(suite.all_passed());
    }
}
