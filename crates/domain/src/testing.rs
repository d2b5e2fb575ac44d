//! Response assertions.
//!
//! Field paths, expectations and the assertion rows a scenario carries.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{CheckError, CheckResult, DomainError, DomainResult};
use crate::response::ResponseCapture;

/// One segment of a field path.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Segment {
    text: String,
    quoted: bool,
}

/// A dot-delimited path into a JSON object.
///
/// Segments are always object keys; digits never index arrays. Grid status
/// documents key browsers by version (`"100.0"`), so an unquoted segment
/// that is not a key is joined with the following segments (`100` + `0`)
/// until a key matches. Shorter keys are tried first; a longer run is tried
/// when the rest of the path does not resolve below the shorter one.
/// Single quotes force a literal key: `browsers.chrome.'100.0'`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    raw: String,
    segments: Vec<Segment>,
}

impl FieldPath {
    /// Parses a path expression. An empty path addresses the root.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidFieldPath` for empty segments (`a..b`,
    /// `.a`, `a.`), unterminated quotes, and quotes that do not wrap a whole
    /// segment.
    pub fn parse(raw: &str) -> DomainResult<Self> {
        let invalid = |reason: &str| DomainError::InvalidFieldPath {
            path: raw.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(Self {
                raw: raw.to_string(),
                segments: Vec::new(),
            });
        }

        let mut segments = Vec::new();
        let mut current = String::new();
        let mut quoted = false;
        let mut in_quote = false;

        for ch in trimmed.chars() {
            match ch {
                '\'' if in_quote => in_quote = false,
                '\'' if current.is_empty() && !quoted => {
                    in_quote = true;
                    quoted = true;
                }
                '\'' => return Err(invalid("quote inside a segment")),
                '.' if !in_quote => {
                    if current.is_empty() && !quoted {
                        return Err(invalid("empty segment"));
                    }
                    segments.push(Segment {
                        text: std::mem::take(&mut current),
                        quoted,
                    });
                    quoted = false;
                }
                _ if quoted && !in_quote => {
                    return Err(invalid("text after closing quote"));
                }
                _ => current.push(ch),
            }
        }

        if in_quote {
            return Err(invalid("unterminated quote"));
        }
        if current.is_empty() && !quoted {
            return Err(invalid("empty segment"));
        }
        segments.push(Segment {
            text: current,
            quoted,
        });

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    /// Returns the path as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns the number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if the path addresses the root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Descends into `root` key by key.
    ///
    /// # Errors
    ///
    /// Returns `CheckError::PathNotFound` naming the first segment that is
    /// absent, or that is reached through a non-object value.
    pub fn resolve<'a>(&self, root: &'a Value) -> CheckResult<&'a Value> {
        self.resolve_from(root, 0)
    }

    fn resolve_from<'a>(&self, current: &'a Value, start: usize) -> CheckResult<&'a Value> {
        if start == self.segments.len() {
            return Ok(current);
        }
        let Value::Object(map) = current else {
            return Err(self.not_found(start));
        };

        let mut first_error = None;
        for (value, consumed) in self.candidates(map, start) {
            match self.resolve_from(value, start + consumed) {
                Ok(found) => return Ok(found),
                Err(e) => {
                    first_error.get_or_insert(e);
                }
            }
        }
        Err(first_error.unwrap_or_else(|| self.not_found(start)))
    }

    /// Every run of segments starting at `start` that names a key, shortest first.
    fn candidates<'a>(
        &self,
        map: &'a Map<String, Value>,
        start: usize,
    ) -> Vec<(&'a Value, usize)> {
        let mut found = Vec::new();
        let mut key = String::new();
        for (offset, segment) in self.segments[start..].iter().enumerate() {
            if offset > 0 {
                if segment.quoted || self.segments[start].quoted {
                    break;
                }
                key.push('.');
            }
            key.push_str(&segment.text);
            if let Some(value) = map.get(&key) {
                found.push((value, offset + 1));
            }
        }
        found
    }

    fn not_found(&self, index: usize) -> CheckError {
        CheckError::PathNotFound {
            path: self.raw.clone(),
            segment: self.segments[index].text.clone(),
        }
    }
}

impl std::fmt::Display for FieldPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

/// What a resolved field value must satisfy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expectation {
    /// Value equals the given JSON value (numbers compare numerically).
    Equals(Value),
    /// Value is an object containing this key.
    HasKey(String),
    /// Value is an object containing all of these keys.
    HasKeys(Vec<String>),
    /// Value is the JSON boolean `true`.
    IsTrue,
}

impl Expectation {
    /// Shorthand for `Equals`.
    #[must_use]
    pub fn equals(value: impl Into<Value>) -> Self {
        Self::Equals(value.into())
    }

    /// Shorthand for `HasKey`.
    #[must_use]
    pub fn has_key(key: impl Into<String>) -> Self {
        Self::HasKey(key.into())
    }

    /// Shorthand for `HasKeys`.
    #[must_use]
    pub fn has_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::HasKeys(keys.into_iter().map(Into::into).collect())
    }

    /// Human-readable description.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::Equals(v) => format!("equals {v}"),
            Self::HasKey(k) => format!("has key '{k}'"),
            Self::HasKeys(keys) => format!("has keys [{}]", keys.join(", ")),
            Self::IsTrue => "is true".to_string(),
        }
    }

    /// Checks `value` found at `subject`.
    ///
    /// # Errors
    ///
    /// Returns `CheckError::Mismatch` if the value does not satisfy the expectation.
    pub fn check(&self, subject: &str, value: &Value) -> CheckResult {
        let satisfied = match self {
            Self::Equals(expected) => json_equals(value, expected),
            Self::HasKey(key) => value.as_object().is_some_and(|m| m.contains_key(key)),
            Self::HasKeys(keys) => value
                .as_object()
                .is_some_and(|m| keys.iter().all(|k| m.contains_key(k))),
            Self::IsTrue => value == &Value::Bool(true),
        };

        if satisfied {
            Ok(())
        } else {
            Err(CheckError::Mismatch {
                subject: subject.to_string(),
                expected: self.description(),
                actual: describe_actual(self, value),
            })
        }
    }
}

/// Compares JSON values, treating `20` and `20.0` as equal.
fn json_equals(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (Value::Number(a), Value::Number(b)) => match (a.as_i64(), b.as_i64()) {
            (Some(x), Some(y)) => x == y,
            _ => a.as_f64() == b.as_f64(),
        },
        _ => actual == expected,
    }
}

fn describe_actual(expectation: &Expectation, value: &Value) -> String {
    match (expectation, value) {
        (Expectation::HasKey(_) | Expectation::HasKeys(_), Value::Object(map)) => {
            let keys: Vec<&str> = map.keys().map(String::as_str).collect();
            format!("keys [{}]", keys.join(", "))
        }
        _ => value.to_string(),
    }
}

/// A single assertion evaluated against a response capture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Assertion {
    /// Status code equals `expected` exactly.
    Status {
        /// Expected status code.
        expected: u16,
    },
    /// Value at `path` satisfies `expect`.
    Field {
        /// Dot-delimited field path.
        path: String,
        /// Expectation on the resolved value.
        expect: Expectation,
    },
    /// Raw body equals `expected` byte for byte.
    BodyEquals {
        /// Expected body content.
        expected: String,
    },
}

impl Assertion {
    /// Creates a status assertion.
    #[must_use]
    pub const fn status(expected: u16) -> Self {
        Self::Status { expected }
    }

    /// Creates a field assertion.
    #[must_use]
    pub fn field(path: impl Into<String>, expect: Expectation) -> Self {
        Self::Field {
            path: path.into(),
            expect,
        }
    }

    /// Creates a raw body assertion.
    #[must_use]
    pub fn body_equals(expected: impl Into<String>) -> Self {
        Self::BodyEquals {
            expected: expected.into(),
        }
    }

    /// Get a human-readable description of this assertion.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::Status { expected } => format!("status == {expected}"),
            Self::Field { path, expect } => format!("{path} {}", expect.description()),
            Self::BodyEquals { .. } => "body equals expected".to_string(),
        }
    }

    /// Evaluates the assertion against a capture.
    ///
    /// # Errors
    ///
    /// Returns the `CheckError` describing the failure.
    pub fn evaluate(&self, capture: &ResponseCapture) -> CheckResult {
        match self {
            Self::Status { expected } => capture.assert_status(*expected),
            Self::Field { path, expect } => capture.assert_field(path, expect),
            Self::BodyEquals { expected } => capture.assert_body_equals(expected),
        }
    }
}
