//! Built-in grid checks and scenario files.
//!
//! `grid_scenarios` is the default suite: every check is a data row, so
//! adding one means adding a `Scenario`, not a function.

use std::path::Path;

use gridcheck_domain::{Assertion, Expectation, RequestSpec, RunnerConfig, Scenario};

use crate::serialization::{SerializationError, read_document};

/// Grid status endpoint.
pub const STATUS_PATH: &str = "/status";

/// WebDriver hub status endpoint; requires Basic auth.
pub const WD_HUB_STATUS_PATH: &str = "/wd/hub/status";

/// Exact `/status` body the reference grid served when the snapshot was taken.
pub const STATUS_SNAPSHOT: &str = r#"{"total":20,"used":0,"queued":0,"pending":0,"browsers":{"chrome":{"100.0":{},"113.0":{},"114.0":{},"120.0":{},"121.0":{},"122.0":{},"123.0":{},"124.0":{},"125.0":{},"126.0":{},"99.0":{}},"firefox":{"122.0":{},"123.0":{},"124.0":{},"125.0":{}},"opera":{"106.0":{},"107.0":{},"108.0":{},"109.0":{}}}}"#;

/// Firefox versions the grid is expected to offer.
pub const FIREFOX_VERSIONS: [&str; 4] = ["122.0", "123.0", "124.0", "125.0"];

/// Builds the default suite for the configured grid.
#[must_use]
pub fn grid_scenarios(config: &RunnerConfig) -> Vec<Scenario> {
    let status = || RequestSpec::get(config.endpoint(STATUS_PATH));
    let total = || Assertion::field("total", Expectation::equals(config.fleet_size));
    let ready = || Assertion::field("value.ready", Expectation::IsTrue);

    let mut basic_auth = RequestSpec::get(config.endpoint(WD_HUB_STATUS_PATH));
    if let Some(credentials) = &config.credentials {
        basic_auth = basic_auth.with_auth(credentials.clone());
    }

    vec![
        Scenario::new("status-total", status()).with_assertion(total()),
        Scenario::new("status-total-with-code", status())
            .with_assertion(Assertion::status(200))
            .with_assertion(total()),
        Scenario::new("chrome-version-key", status())
            .with_assertion(Assertion::status(200))
            .with_assertion(Assertion::field(
                "browsers.chrome",
                Expectation::has_key("100.0"),
            )),
        // Breaks on any change to the fleet, including key order.
        Scenario::new("status-body-snapshot", status())
            .with_assertion(Assertion::status(200))
            .with_assertion(Assertion::body_equals(STATUS_SNAPSHOT)),
        Scenario::new("firefox-versions", status())
            .with_assertion(Assertion::status(200))
            .with_assertion(total())
            .with_assertion(Assertion::field(
                "browsers.firefox",
                Expectation::has_keys(FIREFOX_VERSIONS),
            )),
        Scenario::new(
            "wd-hub-unauthenticated",
            RequestSpec::get(config.endpoint(WD_HUB_STATUS_PATH)),
        )
        .with_assertion(Assertion::status(401)),
        Scenario::new(
            "wd-hub-url-credentials",
            RequestSpec::get(config.endpoint_with_userinfo(WD_HUB_STATUS_PATH)),
        )
        .with_assertion(Assertion::status(200))
        .with_assertion(ready()),
        Scenario::new("wd-hub-basic-auth", basic_auth)
            .with_assertion(Assertion::status(200))
            .with_assertion(ready()),
    ]
}

/// Loads a YAML or JSON list of scenarios.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a scenario list.
pub async fn load_scenarios(path: &Path) -> Result<Vec<Scenario>, SerializationError> {
    let scenarios: Vec<Scenario> = read_document(path).await?;
    tracing::debug!(path = %path.display(), count = scenarios.len(), "loaded scenarios");
    Ok(scenarios)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::io::Write;

    use gridcheck_domain::ResponseCapture;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_names_are_unique() {
        let scenarios = grid_scenarios(&RunnerConfig::default());
        let names: HashSet<_> = scenarios.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names.len(), scenarios.len());
    }

    #[test]
    fn test_rows_follow_base_url() {
        let config = RunnerConfig::new("http://127.0.0.1:4444/");
        for scenario in grid_scenarios(&config) {
            let prepared = scenario.request.prepare().unwrap();
            assert_eq!(prepared.url.host_str(), Some("127.0.0.1"));
            assert_eq!(prepared.url.port(), Some(4444));
        }
    }

    #[test]
    fn test_authenticated_rows_send_same_header() {
        let scenarios = grid_scenarios(&RunnerConfig::default());
        let header = |name: &str| {
            scenarios
                .iter()
                .find(|s| s.name == name)
                .unwrap()
                .request
                .prepare()
                .unwrap()
                .authorization()
        };

        assert_eq!(header("wd-hub-unauthenticated"), None);
        assert_eq!(
            header("wd-hub-url-credentials").as_deref(),
            Some("Basic dXNlcjE6MTIzNA==")
        );
        assert_eq!(header("wd-hub-url-credentials"), header("wd-hub-basic-auth"));
    }

    #[test]
    fn test_snapshot_satisfies_status_rows() {
        let capture = ResponseCapture::new(
            200,
            gridcheck_domain::Headers::new(),
            STATUS_SNAPSHOT.as_bytes(),
            std::time::Duration::ZERO,
        );

        for scenario in grid_scenarios(&RunnerConfig::default())
            .iter()
            .filter(|s| !s.name.starts_with("wd-hub"))
        {
            for assertion in &scenario.assertions {
                assert!(
                    assertion.evaluate(&capture).is_ok(),
                    "{}: {}",
                    scenario.name,
                    assertion.description()
                );
            }
        }
    }

    #[test]
    fn test_extracted_total_matches_fleet_size() {
        let config = RunnerConfig::default();
        let capture = ResponseCapture::new(
            200,
            gridcheck_domain::Headers::new(),
            STATUS_SNAPSHOT.as_bytes(),
            std::time::Duration::ZERO,
        );

        let total = capture.extract("total").unwrap().as_u64();
        assert_eq!(total, Some(config.fleet_size));
    }

    #[tokio::test]
    async fn test_load_scenarios_yaml() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        write!(
            file,
            r#"
- name: ready
  request:
    url: http://127.0.0.1:4444/wd/hub/status
    auth:
      username: user1
      password: "1234"
  assertions:
    - type: status
      expected: 200
    - type: field
      path: value.ready
      expect: is_true
"#
        )
        .unwrap();

        let scenarios = load_scenarios(file.path()).await.unwrap();
        assert_eq!(scenarios.len(), 1);
        assert_eq!(scenarios[0].assertions.len(), 2);
        assert_eq!(
            scenarios[0].assertions[1],
            Assertion::field("value.ready", Expectation::IsTrue)
        );
    }

    #[tokio::test]
    async fn test_load_scenarios_rejects_non_list() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"name": "lonely"}}"#).unwrap();

        let err = load_scenarios(file.path()).await.unwrap_err();
        assert!(matches!(err, SerializationError::Json(_)));
    }
}
