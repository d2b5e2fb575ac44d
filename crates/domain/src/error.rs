//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or processing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The provided URL is invalid or malformed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The URL scheme is not HTTP or HTTPS.
    #[error("unsupported URL scheme: {0}")]
    UnsupportedScheme(String),

    /// A field path expression is malformed.
    #[error("invalid field path '{path}': {reason}")]
    InvalidFieldPath {
        /// Path as written.
        path: String,
        /// What is wrong with it.
        reason: String,
    },
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

/// Errors produced when an assertion is evaluated against a captured response.
///
/// Each variant is a distinct failure category: a body that is not JSON is
/// never reported as a missing path, and a missing path is never reported as
/// a value mismatch.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CheckError {
    /// The body was expected to be JSON but could not be parsed.
    #[error("response body is not valid JSON: {reason}")]
    BodyParse {
        /// Parser diagnostic.
        reason: String,
    },

    /// The field path itself is malformed; nothing was looked up.
    #[error("invalid field path '{path}': {reason}")]
    InvalidPath {
        /// Path as written.
        path: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A segment of the field path does not resolve.
    #[error("path '{path}' not found: no key '{segment}'")]
    PathNotFound {
        /// Full path being resolved.
        path: String,
        /// First segment that could not be resolved.
        segment: String,
    },

    /// The status code differs from the expected one.
    #[error("expected status {expected}, got {actual}")]
    StatusMismatch {
        /// Expected status code.
        expected: u16,
        /// Actual status code.
        actual: u16,
    },

    /// The value is present but does not satisfy the expectation.
    #[error("{subject}: expected {expected}, got {actual}")]
    Mismatch {
        /// What was checked (a path or "body").
        subject: String,
        /// Description of the expectation.
        expected: String,
        /// Description of what was found.
        actual: String,
    },
}

impl CheckError {
    /// Short category name used in reports.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::BodyParse { .. } => "body-parse",
            Self::InvalidPath { .. } => "invalid-path",
            Self::PathNotFound { .. } => "path-not-found",
            Self::StatusMismatch { .. } | Self::Mismatch { .. } => "mismatch",
        }
    }
}

/// Result type alias for assertion evaluation.
pub type CheckResult<T = ()> = Result<T, CheckError>;
