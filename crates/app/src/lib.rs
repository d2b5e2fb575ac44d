//! Gridcheck - request-assertion runner for Selenoid status endpoints.
//!
//! The binary is a thin shell over [`cli::run`].

pub mod cli;

pub use cli::{Cli, CliError, render, run};
