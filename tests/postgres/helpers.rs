//! Shared helpers for `PostgreSQL` integration tests.

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use mockable::DefaultClock;
use pg_embedded_setup_unpriv::TestCluster;
use task_item_store::config::StoreConfig;
use task_item_store::storage::{PgPool, build_pool};
use task_item_store::task_item::domain::{
    ParentTaskId, PdfName, TaskItem, TaskItemFields, TaskItemStatus,
};
use task_item_store::user::domain::UserId;
use tokio::runtime::Runtime;

/// Schema for task items and users.
pub const CREATE_SCHEMA_SQL: &str =
    include_str!("../../migrations/2026-10-19-000000_create_task_items_and_users/up.sql");

/// Template database name for the pre-migrated schema.
pub const TEMPLATE_DB: &str = "task_item_store_test_template";

/// Creates a runtime for driving the async adapters from sync tests.
///
/// # Errors
///
/// Returns an error if the runtime cannot be built.
pub fn test_runtime() -> eyre::Result<Runtime> {
    Ok(tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()?)
}

/// Ensures the template database exists with the schema applied.
///
/// # Errors
///
/// Returns an error if template creation or migration fails.
pub fn ensure_template(cluster: &TestCluster) -> eyre::Result<()> {
    cluster
        .ensure_template_exists(TEMPLATE_DB, |db_name| {
            let url = cluster.connection().database_url(db_name);
            let mut conn = PgConnection::establish(&url).map_err(|e| eyre::eyre!("{e}"))?;
            conn.batch_execute(CREATE_SCHEMA_SQL)
                .map_err(|e| eyre::eyre!("schema migration failed: {e}"))?;
            Ok(())
        })
        .map_err(|e| eyre::eyre!("template setup failed: {e}"))
}

/// Database cloned from the template, dropped with the guard.
///
/// Declare the guard before anything holding one of its pools so the pools
/// close first.
pub struct TestDatabase {
    cluster: &'static TestCluster,
    name: String,
}

impl TestDatabase {
    /// Clones the template into a uniquely named database.
    ///
    /// # Errors
    ///
    /// Returns an error if the template or the clone cannot be set up.
    pub fn create(cluster: &'static TestCluster, prefix: &str) -> eyre::Result<Self> {
        ensure_template(cluster)?;
        let name = format!("{prefix}_{}", uuid::Uuid::new_v4().simple());
        cluster
            .create_database_from_template(name.as_str(), TEMPLATE_DB)
            .map_err(|e| eyre::eyre!("database clone failed: {e}"))?;
        Ok(Self { cluster, name })
    }

    /// Builds a pool for the cloned database. Several connections are
    /// allowed so tests can race writers.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool settings are rejected.
    pub fn pool(&self) -> eyre::Result<PgPool> {
        let url = self.cluster.connection().database_url(&self.name);
        Ok(build_pool(&StoreConfig::new(url).with_max_pool_size(8))?)
    }
}

impl Drop for TestDatabase {
    fn drop(&mut self) {
        // A failure only leaves a scratch database on the test cluster.
        drop(self.cluster.drop_database(self.name.as_str()));
    }
}

/// Builds a task item for `task_id` with the given name and status.
///
/// # Errors
///
/// Returns an error if any field fails validation.
pub fn task_item(pdf_name: &str, status: &str, task_id: &str) -> eyre::Result<TaskItem> {
    let fields = TaskItemFields {
        machine_name: "scanner-01".to_owned(),
        pdf_file_path: format!("/inbox/{pdf_name}"),
        pdf_name: PdfName::new(pdf_name)?,
        status: TaskItemStatus::new(status)?,
        owner_user_id: UserId::new("u-1")?,
        task_id: ParentTaskId::new(task_id)?,
        data: serde_json::json!({ "pages": 3 }),
        performer_data: serde_json::Value::Null,
    };
    Ok(TaskItem::new(fields, &DefaultClock))
}
