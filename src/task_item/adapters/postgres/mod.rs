//! `PostgreSQL` adapters for task item persistence.

mod models;
mod repository;
mod schema;

pub use repository::PostgresTaskItemRepository;
