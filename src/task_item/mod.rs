//! Task item lifecycle management.
//!
//! Covers creation with PDF-name de-duplication, full updates, bulk status
//! transitions that skip items already at the target, deletion, and the
//! record-then-relocate hand-off. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
