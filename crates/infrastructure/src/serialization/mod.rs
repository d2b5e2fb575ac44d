//! Document serialization.
//!
//! Config and scenario files are read as YAML or JSON by extension; reports
//! are written as deterministic JSON (2-space indent, trailing newline).

mod document;

pub use document::*;
