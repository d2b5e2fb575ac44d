//! Authentication domain types

mod types;

pub use types::{Credentials, strip_credentials};
