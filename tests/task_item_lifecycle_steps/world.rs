//! Shared world state for task item lifecycle BDD scenarios.

use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use mockable::DefaultClock;
use rstest::fixture;
use task_item_store::artifact::adapters::FsArtifactRelocator;
use task_item_store::boundary::ApiResponse;
use task_item_store::task_item::{
    adapters::memory::InMemoryTaskItemRepository,
    domain::TaskItemId,
    services::TaskItemService,
};
use tempfile::TempDir;

/// Service type used by the BDD world.
pub type TestTaskItemService = TaskItemService<InMemoryTaskItemRepository, DefaultClock>;

/// Scenario world for task item behaviour tests.
pub struct TaskItemWorld {
    pub service: TestTaskItemService,
    pub relocator: FsArtifactRelocator,
    pub scratch: Option<TempDir>,
    pub created_id: Option<TaskItemId>,
    pub last_response: Option<ApiResponse>,
    pub transitioned: Option<u64>,
}

impl TaskItemWorld {
    /// Creates a world with an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            service: TaskItemService::new(
                Arc::new(InMemoryTaskItemRepository::new()),
                Arc::new(DefaultClock),
            ),
            relocator: FsArtifactRelocator::new(),
            scratch: None,
            created_id: None,
            last_response: None,
            transitioned: None,
        }
    }

    /// Returns `name` inside the scenario's scratch directory, creating the
    /// directory on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or its path is
    /// not UTF-8.
    pub fn scratch_path(&mut self, name: &str) -> eyre::Result<Utf8PathBuf> {
        if self.scratch.is_none() {
            self.scratch = Some(TempDir::new()?);
        }
        let dir = self
            .scratch
            .as_ref()
            .ok_or_else(|| eyre::eyre!("scratch directory missing"))?;
        let root = Utf8Path::from_path(dir.path())
            .ok_or_else(|| eyre::eyre!("scratch directory path is not UTF-8"))?;
        Ok(root.join(name))
    }

    /// Returns the identifier of the item created earlier in the scenario.
    ///
    /// # Errors
    ///
    /// Returns an error if no item was created.
    pub fn created(&self) -> eyre::Result<TaskItemId> {
        self.created_id
            .ok_or_else(|| eyre::eyre!("missing created task item in scenario world"))
    }

    /// Returns the most recent response.
    ///
    /// # Errors
    ///
    /// Returns an error if no step produced a response yet.
    pub fn response(&self) -> eyre::Result<&ApiResponse> {
        self.last_response
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing response in scenario world"))
    }
}

impl Default for TaskItemWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskItemWorld {
    TaskItemWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
