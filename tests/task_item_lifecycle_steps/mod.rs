//! Step definitions for task item lifecycle scenarios.

pub mod world;
