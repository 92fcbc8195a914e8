//! Task item store: record keeping for units of document-processing work.
//!
//! A task item tracks one produced PDF through a free-form status lifecycle:
//! it is created once per PDF name, updated in full, moved between statuses
//! in bulk, and handed off by relocating its artifact on disk.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: validated value types with no infrastructure dependencies
//! - **Ports**: async trait interfaces for persistence and relocation
//! - **Adapters**: `PostgreSQL` (Diesel), in-memory, and filesystem
//!   implementations of the ports
//! - **Boundary**: mapping of service outcomes to status codes and bodies
//!
//! # Modules
//!
//! - [`task_item`]: task item records and their lifecycle
//! - [`user`]: user accounts referenced as task item owners
//! - [`artifact`]: relocation of produced files
//! - [`boundary`]: response mapping for a transport layer
//! - [`config`], [`storage`], [`telemetry`]: runtime wiring

pub mod artifact;
pub mod boundary;
pub mod config;
pub mod storage;
pub mod task_item;
pub mod telemetry;
pub mod user;
