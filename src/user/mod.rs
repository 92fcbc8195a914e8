//! User account records.
//!
//! Users are an independent collaborator of task items: a task item holds a
//! reference to its owner, and nothing here cascades into task items.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
