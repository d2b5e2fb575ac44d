//! Gridcheck Application - Use cases and ports
//!
//! Orchestrates a request through the `HttpClient` port and evaluates
//! scenario assertions against the captured response.

pub mod error;
pub mod ports;
pub mod use_cases;

pub use error::{ApplicationError, ApplicationResult};
pub use ports::{HttpClient, HttpClientError};
pub use use_cases::{ExecuteRequest, RunScenario};
