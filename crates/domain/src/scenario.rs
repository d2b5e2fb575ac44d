//! Scenario fixtures: one request plus the assertions run against its response.

use serde::{Deserialize, Serialize};

use crate::request::RequestSpec;
use crate::testing::Assertion;

/// A single test case expressed as data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Scenario name, unique within a suite.
    pub name: String,
    /// Request to issue.
    pub request: RequestSpec,
    /// Assertions evaluated in order; the first failure ends the scenario.
    #[serde(default)]
    pub assertions: Vec<Assertion>,
}

impl Scenario {
    /// Creates a scenario with no assertions.
    #[must_use]
    pub fn new(name: impl Into<String>, request: RequestSpec) -> Self {
        Self {
            name: name.into(),
            request,
            assertions: Vec::new(),
        }
    }

    /// Add an assertion (builder pattern).
    #[must_use]
    pub fn with_assertion(mut self, assertion: Assertion) -> Self {
        self.assertions.push(assertion);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Expectation;

    #[test]
    fn test_builder() {
        let scenario = Scenario::new("total", RequestSpec::get("https://grid.example.com/status"))
            .with_assertion(Assertion::status(200))
            .with_assertion(Assertion::field("total", Expectation::equals(20)));

        assert_eq!(scenario.name, "total");
        assert_eq!(scenario.assertions.len(), 2);
    }

    #[test]
    fn test_deserialize_without_assertions() {
        let scenario: Scenario = serde_json::from_str(
            r#"{"name": "ping", "request": {"url": "https://grid.example.com/status"}}"#,
        )
        .unwrap();
        assert!(scenario.assertions.is_empty());
        assert!(scenario.request.auth.is_none());
    }
}
