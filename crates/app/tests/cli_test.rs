//! Integration tests for the command line runner.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::io::Write;

use clap::Parser;
use gridcheck::{Cli, CliError, run};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn grid() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(gridcheck_infrastructure::STATUS_SNAPSHOT, "application/json"),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/wd/hub/status"))
        .and(header("authorization", "Basic dXNlcjE6MTIzNA=="))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(
                r#"{"value":{"message":"Selenoid 1.11.3","ready":true}}"#,
                "application/json",
            ),
        )
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/wd/hub/status"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    server
}

fn cli(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("gridcheck").chain(args.iter().copied())).unwrap()
}

#[tokio::test]
async fn test_builtin_checks_pass() {
    let server = grid().await;
    let uri = server.uri();

    let passed = run(&cli(&["--base-url", &uri])).await.unwrap();
    assert!(passed);
}

#[tokio::test]
async fn test_filtered_run_against_broken_hub_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/wd/hub/status"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    let uri = server.uri();

    let passed = run(&cli(&["--base-url", &uri, "--filter", "wd-hub-basic"]))
        .await
        .unwrap();
    assert!(!passed);
}

#[tokio::test]
async fn test_scenario_file() {
    let server = grid().await;
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    write!(
        file,
        r#"
- name: opera-present
  request:
    url: {uri}/status
  assertions:
    - type: status
      expected: 200
    - type: field
      path: browsers.opera
      expect:
        has_keys: ["106.0", "109.0"]
"#,
        uri = server.uri()
    )
    .unwrap();
    let scenarios = file.path().to_str().unwrap().to_string();

    let passed = run(&cli(&["--scenarios", &scenarios, "--json"]))
        .await
        .unwrap();
    assert!(passed);
}

#[tokio::test]
async fn test_missing_scenario_file() {
    let err = run(&cli(&["--scenarios", "/no/such/scenarios.yaml"]))
        .await
        .unwrap_err();
    assert!(matches!(err, CliError::Scenarios(_)));
}

#[tokio::test]
async fn test_list_does_not_send_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;
    let uri = server.uri();

    let passed = run(&cli(&["--base-url", &uri, "--list"])).await.unwrap();
    assert!(passed);
}
