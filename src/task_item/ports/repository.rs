//! Repository port for task item persistence and lookup.

use crate::task_item::domain::{
    ParentTaskId, PdfName, TaskItem, TaskItemFields, TaskItemId, TaskItemStatus,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for task item repository operations.
pub type TaskItemRepositoryResult<T> = Result<T, TaskItemRepositoryError>;

/// Task item persistence contract.
#[async_trait]
pub trait TaskItemRepository: Send + Sync {
    /// Returns every task item in no particular order.
    async fn list_all(&self) -> TaskItemRepositoryResult<Vec<TaskItem>>;

    /// Returns the rows matching `id`: empty when the item does not exist,
    /// otherwise a single element.
    async fn find_by_id(&self, id: TaskItemId) -> TaskItemRepositoryResult<Vec<TaskItem>>;

    /// Returns the items of `task_id` currently at `status`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskItemRepositoryError::NoMatchingItems`] when the filter
    /// matches nothing. An empty result is never returned as success.
    async fn find_by_task_and_status(
        &self,
        task_id: &ParentTaskId,
        status: &TaskItemStatus,
    ) -> TaskItemRepositoryResult<Vec<TaskItem>>;

    /// Stores `item` unless another item already uses its PDF name.
    ///
    /// The pre-insert lookup only produces an early conflict. The store's
    /// unique index on the PDF name is what keeps concurrent inserts apart,
    /// and its violation is reported as the same conflict.
    ///
    /// # Errors
    ///
    /// Returns [`TaskItemRepositoryError::DuplicatePdfName`] when the name is
    /// already taken.
    async fn insert_if_absent(&self, item: &TaskItem) -> TaskItemRepositoryResult<TaskItem>;

    /// Replaces every mutable field of an existing item.
    ///
    /// # Errors
    ///
    /// Returns [`TaskItemRepositoryError::NotFound`] when no row has `id`, and
    /// [`TaskItemRepositoryError::DuplicatePdfName`] when the new PDF name
    /// belongs to another item.
    async fn update_full(
        &self,
        id: TaskItemId,
        fields: &TaskItemFields,
        updated_at: DateTime<Utc>,
    ) -> TaskItemRepositoryResult<()>;

    /// Moves every listed item not already at `status` to `status`.
    ///
    /// Returns the number of rows changed. Zero covers both "no such ids" and
    /// "all already at `status`"; callers cannot tell those apart.
    async fn update_status_bulk(
        &self,
        ids: &[TaskItemId],
        status: &TaskItemStatus,
        updated_at: DateTime<Utc>,
    ) -> TaskItemRepositoryResult<u64>;

    /// Deletes an item.
    ///
    /// # Errors
    ///
    /// Returns [`TaskItemRepositoryError::NotFound`] when no row has `id`.
    async fn delete_by_id(&self, id: TaskItemId) -> TaskItemRepositoryResult<()>;
}

/// Errors returned by task item repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskItemRepositoryError {
    /// No item has the identifier.
    #[error("task item not found: {0}")]
    NotFound(TaskItemId),

    /// The task and status filter matched no items.
    #[error("no task items for task {task_id} with status {status}")]
    NoMatchingItems {
        /// Parent task filter.
        task_id: ParentTaskId,
        /// Status filter.
        status: TaskItemStatus,
    },

    /// Another item already uses the PDF name.
    #[error("duplicate task item pdf name: {0}")]
    DuplicatePdfName(PdfName),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted task item data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskItemRepositoryError {
    /// Wraps persisted-data decoding or validation failures.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence-layer failure.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Returns `true` for expected outcomes that are not store failures.
    #[must_use]
    pub const fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::NotFound(_) | Self::NoMatchingItems { .. } | Self::DuplicatePdfName(_)
        )
    }
}
