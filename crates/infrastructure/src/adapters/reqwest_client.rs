//! HTTP Client implementation using reqwest.
//!
//! This adapter implements the `HttpClient` port using the reqwest library.
//! One pooled `reqwest::Client` serves every scenario of a run.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use gridcheck_application::ports::{HttpClient, HttpClientError};
use gridcheck_domain::request::Header;
use gridcheck_domain::{Headers, PreparedRequest, ResponseCapture};
use reqwest::Client;
use reqwest::header::AUTHORIZATION;

/// Redirects followed before giving up.
const MAX_REDIRECTS: usize = 10;

/// HTTP client implementation using reqwest.
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    /// Creates a new HTTP client with default settings.
    ///
    /// Default configuration:
    /// - Follow redirects: up to 10
    /// - TLS verification: enabled
    /// - User-Agent: "gridcheck/<version>"
    ///
    /// Timeouts are applied per request.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new() -> Result<Self, HttpClientError> {
        let client = Client::builder()
            .user_agent(concat!("gridcheck/", env!("CARGO_PKG_VERSION")))
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| HttpClientError::Other(e.to_string()))?;

        Ok(Self { client })
    }

    /// Maps reqwest errors to `HttpClientError`.
    fn map_error(error: &reqwest::Error, timeout_ms: u64) -> HttpClientError {
        if error.is_timeout() {
            return HttpClientError::Timeout { timeout_ms };
        }

        let host = || {
            error
                .url()
                .and_then(|u| u.host_str())
                .unwrap_or("unknown")
                .to_string()
        };

        if error.is_connect() {
            // reqwest hides the io::Error kind; its chain text is all we have.
            let message = error_chain(error);
            let lowered = message.to_lowercase();
            if lowered.contains("dns") || lowered.contains("resolve") {
                return HttpClientError::DnsError {
                    host: host(),
                    message,
                };
            }
            if lowered.contains("refused") {
                return HttpClientError::ConnectionRefused {
                    host: host(),
                    port: error
                        .url()
                        .and_then(reqwest::Url::port_or_known_default)
                        .unwrap_or(80),
                };
            }
            return HttpClientError::ConnectionFailed(message);
        }

        if error.is_redirect() {
            return HttpClientError::Other(format!("too many redirects (max {MAX_REDIRECTS})"));
        }

        HttpClientError::Other(error_chain(error))
    }
}

fn error_chain(error: &reqwest::Error) -> String {
    let mut message = error.to_string();
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn execute(
        &self,
        request: &PreparedRequest,
        timeout: Duration,
    ) -> Result<ResponseCapture, HttpClientError> {
        let timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        let authorization = request.authorization();

        let mut builder = self.client.get(request.url.clone()).timeout(timeout);

        for header in request.headers.iter() {
            // Resolved credentials replace any hand-written Authorization header.
            if authorization.is_some() && header.name.eq_ignore_ascii_case(AUTHORIZATION.as_str()) {
                continue;
            }
            builder = builder.header(&header.name, &header.value);
        }
        if let Some(value) = authorization {
            builder = builder.header(AUTHORIZATION, value);
        }

        let start = Instant::now();

        let response = builder
            .send()
            .await
            .map_err(|e| Self::map_error(&e, timeout_ms))?;

        let status = response.status().as_u16();
        let headers: Headers = response
            .headers()
            .iter()
            .map(|(k, v)| Header::new(k.as_str(), v.to_str().unwrap_or("<binary>")))
            .collect();

        let body = response
            .bytes()
            .await
            .map_err(|e| Self::map_error(&e, timeout_ms))?;

        let duration = start.elapsed();
        tracing::debug!(
            url = %request.url,
            status,
            bytes = body.len(),
            ?duration,
            "response received"
        );

        Ok(ResponseCapture::new(status, headers, &body, duration))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridcheck_domain::RequestSpec;

    #[test]
    fn test_client_creation() {
        let client = ReqwestHttpClient::new();
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_unreachable_target_is_network_error() {
        let client = ReqwestHttpClient::new().unwrap();
        // Port 9 (discard) is closed on any sane test host.
        let request = RequestSpec::get("http://127.0.0.1:9/status").prepare().unwrap();

        let err = client
            .execute(&request, Duration::from_secs(5))
            .await
            .unwrap_err();

        assert!(err.is_unreachable(), "unexpected error: {err:?}");
    }
}
