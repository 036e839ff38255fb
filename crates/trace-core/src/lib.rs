//! trace-core
//!
//! Pure domain types and backend path conventions.
//! No HTTP dependency; this is the shared vocabulary of the Trace system.

pub mod endpoints;
pub mod error;
pub mod models;
