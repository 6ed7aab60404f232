//! Document store bootstrap
//!
//! Opens the single process-wide MongoDB client once at startup. The outcome
//! is reported through the log only.

mod connection;

pub use connection::{client, connect_db, redact_url};
