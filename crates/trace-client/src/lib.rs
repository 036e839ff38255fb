//! trace-client
//!
//! Blocking HTTP client for the scoring/persistence backend. Thin wrapper
//! around `ureq`: one attempt per call, no retry.

pub mod client;
pub mod error;
