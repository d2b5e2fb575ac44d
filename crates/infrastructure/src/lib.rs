//! Gridcheck Infrastructure - Adapters and implementations
//!
//! Concrete implementations of the application ports, plus configuration
//! loading, the built-in grid fixtures and the suite runner.

pub mod adapters;
pub mod config;
pub mod fixtures;
pub mod serialization;
pub mod testing;

pub use adapters::ReqwestHttpClient;
pub use config::{ConfigError, apply_env, load_config};
pub use fixtures::{STATUS_SNAPSHOT, grid_scenarios, load_scenarios};
pub use serialization::{DocumentFormat, SerializationError, read_document, to_json_stable};
pub use testing::SuiteRunner;
