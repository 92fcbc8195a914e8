//! Adapter implementations of the task item ports.
//!
//! - [`memory`]: lock-guarded in-process store used by tests
//! - [`postgres`]: Diesel-backed `PostgreSQL` store

pub mod memory;
pub mod postgres;
