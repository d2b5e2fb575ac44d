//! HTTP Client port

use std::time::Duration;

use async_trait::async_trait;
use gridcheck_domain::{PreparedRequest, ResponseCapture};
use thiserror::Error;

/// Transport-level failures. Every variant is a network error: the request
/// never produced a response to assert on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpClientError {
    /// URL could not be used by the client.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// No response within the timeout.
    #[error("request timed out after {timeout_ms}ms")]
    Timeout {
        /// Timeout that elapsed.
        timeout_ms: u64,
    },

    /// Host name could not be resolved.
    #[error("could not resolve host '{host}': {message}")]
    DnsError {
        /// Host being resolved.
        host: String,
        /// Resolver diagnostic.
        message: String,
    },

    /// Target actively refused the connection.
    #[error("connection refused by {host}:{port}")]
    ConnectionRefused {
        /// Target host.
        host: String,
        /// Target port.
        port: u16,
    },

    /// Connection could not be established.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Anything else the transport reports, including body read failures.
    #[error("{0}")]
    Other(String),
}

impl HttpClientError {
    /// Returns true when the target could not be reached in time or at all.
    #[must_use]
    pub const fn is_unreachable(&self) -> bool {
        matches!(
            self,
            Self::Timeout { .. }
                | Self::DnsError { .. }
                | Self::ConnectionRefused { .. }
                | Self::ConnectionFailed(_)
        )
    }
}

/// Port for executing HTTP requests.
///
/// This trait abstracts the HTTP client implementation, allowing
/// the application layer to be independent of specific HTTP libraries.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Sends a GET for the prepared request and captures the response.
    ///
    /// `timeout` bounds the whole exchange, body included.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails due to network issues or timeout.
    async fn execute(
        &self,
        request: &PreparedRequest,
        timeout: Duration,
    ) -> Result<ResponseCapture, HttpClientError>;
}
