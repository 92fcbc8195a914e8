//! Adapter implementations of the user ports.

pub mod memory;
pub mod postgres;
