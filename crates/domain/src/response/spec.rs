//! Response capture type
//!
//! Holds what came back from a single request (status, headers, raw and
//! parsed body, timing) and the point-wise assertions evaluated against it.

use std::time::Duration;

use serde_json::Value;

use crate::error::{CheckError, CheckResult, DomainError};
use crate::request::Headers;
use crate::testing::{Expectation, FieldPath};

/// Number of body characters shown in mismatch diagnostics.
const BODY_PREVIEW_CHARS: usize = 100;

/// HTTP status code with semantic helpers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusCode(pub u16);

impl StatusCode {
    /// Creates a new `StatusCode`.
    #[must_use]
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Returns the numeric status code.
    #[must_use]
    pub const fn as_u16(&self) -> u16 {
        self.0
    }

    /// Returns the canonical reason phrase for common status codes.
    #[must_use]
    pub const fn reason_phrase(&self) -> &'static str {
        match self.0 {
            200 => "OK",
            204 => "No Content",
            301 => "Moved Permanently",
            302 => "Found",
            304 => "Not Modified",
            400 => "Bad Request",
            401 => "Unauthorized",
            403 => "Forbidden",
            404 => "Not Found",
            408 => "Request Timeout",
            429 => "Too Many Requests",
            500 => "Internal Server Error",
            502 => "Bad Gateway",
            503 => "Service Unavailable",
            504 => "Gateway Timeout",
            _ => "Unknown",
        }
    }
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.0, self.reason_phrase())
    }
}

impl From<u16> for StatusCode {
    fn from(code: u16) -> Self {
        Self(code)
    }
}

/// The recorded outcome of issuing one request.
///
/// Created once per request and read-only afterwards. `parsed_body` is
/// `None` whenever the raw body is not valid JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseCapture {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: Headers,
    /// Response body as received (lossy UTF-8).
    pub raw_body: String,
    /// Response body parsed as JSON, if it parses.
    pub parsed_body: Option<Value>,
    /// Time from send to full body read.
    pub duration: Duration,
    parse_error: Option<String>,
}

impl ResponseCapture {
    /// Creates a capture from raw response data, attempting a JSON parse of the body.
    #[must_use]
    pub fn new(
        status: impl Into<StatusCode>,
        headers: Headers,
        body: &[u8],
        duration: Duration,
    ) -> Self {
        let raw_body = String::from_utf8_lossy(body).into_owned();
        let (parsed_body, parse_error) = match serde_json::from_str::<Value>(&raw_body) {
            Ok(value) => (Some(value), None),
            Err(e) => (None, Some(e.to_string())),
        };

        Self {
            status: status.into().as_u16(),
            headers,
            raw_body,
            parsed_body,
            duration,
            parse_error,
        }
    }

    /// Returns the status as a `StatusCode` struct.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        StatusCode::new(self.status)
    }

    /// Returns the parsed JSON body.
    ///
    /// # Errors
    ///
    /// Returns `CheckError::BodyParse` when the body is not JSON.
    pub fn json(&self) -> CheckResult<&Value> {
        self.parsed_body.as_ref().ok_or_else(|| CheckError::BodyParse {
            reason: self
                .parse_error
                .clone()
                .unwrap_or_else(|| "no body".to_string()),
        })
    }

    /// Asserts the status code equals `expected` exactly.
    ///
    /// # Errors
    ///
    /// Returns `CheckError::StatusMismatch` carrying both codes.
    pub fn assert_status(&self, expected: u16) -> CheckResult {
        if self.status == expected {
            Ok(())
        } else {
            Err(CheckError::StatusMismatch {
                expected,
                actual: self.status,
            })
        }
    }

    /// Returns the JSON value at a dot-delimited field path.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPath` for a malformed path, `BodyParse` if the body
    /// is not JSON, `PathNotFound` if the path does not resolve.
    pub fn extract(&self, path: &str) -> CheckResult<&Value> {
        field_path(path)?.resolve(self.json()?)
    }

    /// Resolves `path` and checks the value against `expectation`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPath`, `BodyParse`, `PathNotFound` or `Mismatch`, in
    /// that order of precedence.
    pub fn assert_field(&self, path: &str, expectation: &Expectation) -> CheckResult {
        let value = field_path(path)?.resolve(self.json()?)?;
        expectation.check(path, value)
    }

    /// Compares the raw body to `expected` byte for byte.
    ///
    /// No whitespace or key-order normalization is applied, so any change in
    /// the server's formatting or in volatile fields fails this check.
    ///
    /// # Errors
    ///
    /// Returns `CheckError::Mismatch` with a preview of the actual body.
    pub fn assert_body_equals(&self, expected: &str) -> CheckResult {
        if self.raw_body == expected {
            Ok(())
        } else {
            Err(CheckError::Mismatch {
                subject: "body".to_string(),
                expected: preview(expected),
                actual: preview(&self.raw_body),
            })
        }
    }
}

fn field_path(path: &str) -> CheckResult<FieldPath> {
    FieldPath::parse(path).map_err(|e| CheckError::InvalidPath {
        path: path.to_string(),
        reason: match e {
            DomainError::InvalidFieldPath { reason, .. } => reason,
            other => other.to_string(),
        },
    })
}

fn preview(body: &str) -> String {
    if body.chars().count() > BODY_PREVIEW_CHARS {
        let head: String = body.chars().take(BODY_PREVIEW_CHARS).collect();
        format!("{head}...")
    } else {
        body.to_string()
    }
}
