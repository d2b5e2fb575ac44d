//! Suite execution.

mod runner;

pub use runner::SuiteRunner;
