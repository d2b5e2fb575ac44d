//! Gridcheck Domain - Core types
//!
//! This crate defines the request, response and assertion model of the
//! request-assertion runner. All types here are pure Rust with no I/O.

pub mod auth;
pub mod error;
pub mod report;
pub mod request;
pub mod response;
pub mod scenario;
pub mod settings;
pub mod testing;

pub use auth::Credentials;
pub use error::{CheckError, CheckResult, DomainError, DomainResult};
pub use report::{Failure, ScenarioReport, SuiteReport};
pub use request::{Headers, PreparedRequest, RequestSpec};
pub use response::{ResponseCapture, StatusCode};
pub use scenario::Scenario;
pub use settings::{LogFlagError, LogOptions, RunnerConfig};
pub use testing::{Assertion, Expectation, FieldPath};
