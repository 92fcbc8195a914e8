//! Artifact relocation for task item outputs.
//!
//! Moving a produced PDF is a side effect that runs alongside, never inside,
//! a task item record update. There is no transactional link between the two.
//!
//! - Port contract in [`ports`]
//! - Filesystem implementation in [`adapters`]

pub mod adapters;
pub mod ports;

#[cfg(test)]
mod tests;
