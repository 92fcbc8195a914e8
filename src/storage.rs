//! Storage gateway construction.
//!
//! The pool is built explicitly from a [`StoreConfig`] and handed to each
//! adapter. Adapters check out one connection per unit of work and return it
//! when the work finishes.

use crate::config::StoreConfig;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use tracing::info;

/// `PostgreSQL` connection pool shared by the adapters.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Builds a connection pool from `config`.
///
/// Connections are established lazily: the pool is created without opening
/// any, so construction succeeds while the database is unreachable and the
/// first unit of work reports the failure.
///
/// # Errors
///
/// Returns [`PoolError`] when the pool settings are rejected.
pub fn build_pool(config: &StoreConfig) -> Result<PgPool, PoolError> {
    let manager = ConnectionManager::<PgConnection>::new(config.database_url.as_str());
    let pool = Pool::builder()
        .max_size(config.max_pool_size)
        .min_idle(Some(0))
        .connection_timeout(config.connection_timeout)
        .build(manager)?;
    info!(
        max_pool_size = config.max_pool_size,
        "storage pool configured"
    );
    Ok(pool)
}
