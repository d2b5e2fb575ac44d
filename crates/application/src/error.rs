//! Application error types

use gridcheck_domain::{CheckError, DomainError, Failure};
use thiserror::Error;

use crate::ports::HttpClientError;

/// Application-level errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplicationError {
    /// The request spec failed validation before anything was sent.
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] DomainError),

    /// The target was unreachable or timed out.
    #[error("network error: {0}")]
    Network(#[from] HttpClientError),

    /// A response arrived but an assertion failed.
    #[error(transparent)]
    Check(#[from] CheckError),
}

impl ApplicationError {
    /// Short category name used in reports.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidRequest(_) => "invalid-request",
            Self::Network(_) => "network",
            Self::Check(e) => e.kind(),
        }
    }

    /// Converts this error into a report failure entry.
    #[must_use]
    pub fn to_failure(&self) -> Failure {
        Failure {
            kind: self.kind().to_string(),
            message: self.to_string(),
        }
    }
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
