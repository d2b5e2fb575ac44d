//! Execute Request Use Case
//!
//! Validates a `RequestSpec`, resolves its credentials, sends it through the
//! `HttpClient` port and returns the captured response.

use std::sync::Arc;
use std::time::Duration;

use gridcheck_domain::{LogOptions, RequestSpec, ResponseCapture, RunnerConfig};

use crate::ApplicationResult;
use crate::ports::HttpClient;

/// Log target for the request/response side channel.
pub const HTTP_LOG_TARGET: &str = "gridcheck::http";

/// Use case for executing a single GET request.
///
/// Holds no mutable state: each call is a function of the request and the
/// remote endpoint. No retries.
///
/// # Example
///
/// ```ignore
/// let client = ReqwestHttpClient::new()?;
/// let use_case = ExecuteRequest::new(Arc::new(client));
///
/// let capture = use_case.execute(&RequestSpec::get("https://grid.example.com/status")).await?;
/// capture.assert_status(200)?;
/// ```
pub struct ExecuteRequest<C: HttpClient> {
    client: Arc<C>,
    timeout: Duration,
    log: LogOptions,
}

impl<C: HttpClient> ExecuteRequest<C> {
    /// Creates the use case with default timeout and logging off.
    pub fn new(client: Arc<C>) -> Self {
        let defaults = RunnerConfig::default();
        Self {
            client,
            timeout: defaults.timeout(),
            log: defaults.log,
        }
    }

    /// Creates the use case from a runner configuration.
    pub const fn with_config(client: Arc<C>, config: &RunnerConfig) -> Self {
        Self {
            client,
            timeout: config.timeout(),
            log: config.log,
        }
    }

    /// Overrides the default timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets which parts of each exchange are logged.
    #[must_use]
    pub const fn with_log(mut self, log: LogOptions) -> Self {
        self.log = log;
        self
    }

    /// Executes the request and returns the captured response.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::InvalidRequest` if the URL is not a valid
    /// HTTP(S) URL, and `ApplicationError::Network` if the target is
    /// unreachable or the timeout elapses.
    pub async fn execute(&self, spec: &RequestSpec) -> ApplicationResult<ResponseCapture> {
        let prepared = spec.prepare()?;
        let timeout = prepared.timeout.unwrap_or(self.timeout);

        if self.log.uri {
            tracing::info!(
                target: HTTP_LOG_TARGET,
                method = "GET",
                uri = %prepared.url,
                basic_auth = prepared.credentials.is_some(),
                "request"
            );
        }

        let capture = match self.client.execute(&prepared, timeout).await {
            Ok(capture) => capture,
            Err(e) => {
                tracing::warn!(
                    uri = %prepared.url,
                    unreachable = e.is_unreachable(),
                    error = %e,
                    "request failed"
                );
                return Err(e.into());
            }
        };

        if self.log.status {
            tracing::info!(
                target: HTTP_LOG_TARGET,
                status = %capture.status_code(),
                duration_ms = u64::try_from(capture.duration.as_millis()).unwrap_or(u64::MAX),
                "response"
            );
        }
        if self.log.body {
            tracing::info!(target: HTTP_LOG_TARGET, body = %capture.raw_body, "response body");
        }

        Ok(capture)
    }
}
