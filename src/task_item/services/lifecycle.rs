//! Service layer for task item creation, update, and status transitions.

use crate::task_item::{
    domain::{
        ParentTaskId, PdfName, TaskItem, TaskItemDomainError, TaskItemFields, TaskItemId,
        TaskItemStatus, required_text,
    },
    ports::{TaskItemRepository, TaskItemRepositoryError},
};
use crate::user::domain::{UserDomainError, UserId};
use mockable::Clock;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info};

/// Request payload carrying every mutable task item field.
///
/// Used both for creation and for full-record updates. The JSON field names
/// accept the producer-side spellings `knUser_id` and `performerData`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TaskItemRequest {
    machine_name: String,
    pdf_file_path: String,
    pdf_name: String,
    status: String,
    #[serde(alias = "knUser_id")]
    owner_user_id: String,
    task_id: String,
    #[serde(default)]
    data: Value,
    #[serde(default, alias = "performerData")]
    performer_data: Value,
}

impl TaskItemRequest {
    /// Creates a request with the required text fields and empty payloads.
    #[must_use]
    pub fn new(
        machine_name: impl Into<String>,
        pdf_file_path: impl Into<String>,
        pdf_name: impl Into<String>,
        status: impl Into<String>,
        owner_user_id: impl Into<String>,
        task_id: impl Into<String>,
    ) -> Self {
        Self {
            machine_name: machine_name.into(),
            pdf_file_path: pdf_file_path.into(),
            pdf_name: pdf_name.into(),
            status: status.into(),
            owner_user_id: owner_user_id.into(),
            task_id: task_id.into(),
            data: Value::Null,
            performer_data: Value::Null,
        }
    }

    /// Sets the upstream processing payload.
    #[must_use]
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = data;
        self
    }

    /// Sets the performer payload.
    #[must_use]
    pub fn with_performer_data(mut self, performer_data: Value) -> Self {
        self.performer_data = performer_data;
        self
    }

    fn into_fields(self) -> TaskItemServiceResult<TaskItemFields> {
        Ok(TaskItemFields {
            machine_name: required_text("machine_name", self.machine_name)?,
            pdf_file_path: required_text("pdf_file_path", self.pdf_file_path)?,
            pdf_name: PdfName::new(self.pdf_name)?,
            status: TaskItemStatus::new(self.status)?,
            owner_user_id: UserId::new(self.owner_user_id)?,
            task_id: ParentTaskId::new(self.task_id)?,
            data: self.data,
            performer_data: self.performer_data,
        })
    }
}

/// Request payload for moving several task items to one status.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TransitionStatusRequest {
    #[serde(alias = "id")]
    ids: Vec<TaskItemId>,
    #[serde(default)]
    status: String,
}

impl TransitionStatusRequest {
    /// Creates a transition request.
    #[must_use]
    pub fn new(ids: impl IntoIterator<Item = TaskItemId>, status: impl Into<String>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
            status: status.into(),
        }
    }

    /// Replaces the target status, for callers that carry it outside the
    /// body (for example in a path segment).
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }
}

/// Outcome of a create call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateTaskItemOutcome {
    /// The item was stored.
    Created(TaskItem),
    /// Another item already uses the PDF name; nothing was written.
    AlreadyExists(PdfName),
}

/// Outcome of a successful bulk status transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusTransition {
    /// Number of items whose status changed.
    pub updated: u64,
}

/// Service-level errors for task item operations.
#[derive(Debug, Error)]
pub enum TaskItemServiceError {
    /// Field validation failed.
    #[error(transparent)]
    Domain(#[from] TaskItemDomainError),
    /// The owner reference is invalid.
    #[error("invalid owner reference: {0}")]
    InvalidOwner(#[from] UserDomainError),
    /// Repository operation failed or reported an expected miss.
    #[error(transparent)]
    Repository(#[from] TaskItemRepositoryError),
    /// A bulk transition was requested without any ids.
    #[error("at least one task item id is required")]
    EmptyIdSet,
    /// No listed item changed status: either none exist or all were already
    /// at the target.
    #[error("no task items moved to status {0}")]
    NothingTransitioned(TaskItemStatus),
}

impl TaskItemServiceError {
    /// Returns `true` when the error is a validation failure of the input.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Domain(_) | Self::InvalidOwner(_) | Self::EmptyIdSet
        )
    }
}

/// Result type for task item service operations.
pub type TaskItemServiceResult<T> = Result<T, TaskItemServiceError>;

/// Task item lifecycle orchestration service.
#[derive(Clone)]
pub struct TaskItemService<R, C>
where
    R: TaskItemRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> TaskItemService<R, C>
where
    R: TaskItemRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task item service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Lists every task item.
    ///
    /// # Errors
    ///
    /// Returns persistence-layer errors from the repository.
    pub async fn list_all(&self) -> TaskItemServiceResult<Vec<TaskItem>> {
        let items = self
            .repository
            .list_all()
            .await
            .inspect_err(|err| log_repository_error("list_all", err))?;
        Ok(items)
    }

    /// Returns the item with `id` as a zero- or one-element vector.
    ///
    /// # Errors
    ///
    /// Returns persistence-layer errors from the repository.
    pub async fn get(&self, id: TaskItemId) -> TaskItemServiceResult<Vec<TaskItem>> {
        let items = self
            .repository
            .find_by_id(id)
            .await
            .inspect_err(|err| log_repository_error("get", err))?;
        Ok(items)
    }

    /// Returns the items of a task currently at `status`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskItemRepositoryError::NoMatchingItems`] (wrapped) when
    /// nothing matches, domain errors for blank filters, and persistence
    /// errors.
    pub async fn find_by_task_and_status(
        &self,
        task_id: &str,
        status: &str,
    ) -> TaskItemServiceResult<Vec<TaskItem>> {
        let task = ParentTaskId::new(task_id)?;
        let wanted = TaskItemStatus::new(status)?;
        let items = self
            .repository
            .find_by_task_and_status(&task, &wanted)
            .await
            .inspect_err(|err| log_repository_error("find_by_task_and_status", err))?;
        Ok(items)
    }

    /// Creates a task item unless its PDF name is already in use.
    ///
    /// A duplicate is not an error: producers may resubmit the same artifact
    /// and receive [`CreateTaskItemOutcome::AlreadyExists`].
    ///
    /// # Errors
    ///
    /// Returns validation errors for missing fields and persistence errors
    /// from the repository.
    pub async fn create(
        &self,
        request: TaskItemRequest,
    ) -> TaskItemServiceResult<CreateTaskItemOutcome> {
        let fields = request.into_fields()?;
        let item = TaskItem::new(fields, &*self.clock);
        match self.repository.insert_if_absent(&item).await {
            Ok(stored) => {
                info!(task_item_id = %stored.id(), pdf_name = %stored.pdf_name(), "task item created");
                Ok(CreateTaskItemOutcome::Created(stored))
            }
            Err(TaskItemRepositoryError::DuplicatePdfName(pdf_name)) => {
                debug!(%pdf_name, "task item already exists");
                Ok(CreateTaskItemOutcome::AlreadyExists(pdf_name))
            }
            Err(err) => {
                log_repository_error("create", &err);
                Err(err.into())
            }
        }
    }

    /// Replaces every mutable field of an existing item.
    ///
    /// # Errors
    ///
    /// Returns validation errors before touching the store,
    /// [`TaskItemRepositoryError::NotFound`] (wrapped) when no item has `id`,
    /// and persistence errors.
    pub async fn update(
        &self,
        id: TaskItemId,
        request: TaskItemRequest,
    ) -> TaskItemServiceResult<()> {
        let fields = request.into_fields()?;
        self.repository
            .update_full(id, &fields, self.clock.utc())
            .await
            .inspect_err(|err| log_repository_error("update", err))?;
        info!(task_item_id = %id, "task item updated");
        Ok(())
    }

    /// Moves every listed item that is not already at the target status.
    ///
    /// The transition is unconditional on the prior status: any label may
    /// move to any other. Items already at the target are skipped and not
    /// counted.
    ///
    /// # Errors
    ///
    /// Returns [`TaskItemServiceError::EmptyIdSet`] for an empty id list,
    /// domain errors for a blank status,
    /// [`TaskItemServiceError::NothingTransitioned`] when no row changed, and
    /// persistence errors.
    pub async fn transition_status(
        &self,
        request: TransitionStatusRequest,
    ) -> TaskItemServiceResult<StatusTransition> {
        if request.ids.is_empty() {
            return Err(TaskItemServiceError::EmptyIdSet);
        }
        let target = TaskItemStatus::new(request.status)?;
        let updated = self
            .repository
            .update_status_bulk(&request.ids, &target, self.clock.utc())
            .await
            .inspect_err(|err| log_repository_error("transition_status", err))?;

        if updated == 0 {
            debug!(status = %target, requested = request.ids.len(), "no task items transitioned");
            return Err(TaskItemServiceError::NothingTransitioned(target));
        }
        info!(status = %target, updated, "task items transitioned");
        Ok(StatusTransition { updated })
    }

    /// Deletes an item.
    ///
    /// # Errors
    ///
    /// Returns [`TaskItemRepositoryError::NotFound`] (wrapped) when no item has
    /// `id`, and persistence errors.
    pub async fn delete(&self, id: TaskItemId) -> TaskItemServiceResult<()> {
        self.repository
            .delete_by_id(id)
            .await
            .inspect_err(|err| log_repository_error("delete", err))?;
        info!(task_item_id = %id, "task item deleted");
        Ok(())
    }
}

fn log_repository_error(operation: &'static str, err: &TaskItemRepositoryError) {
    if err.is_expected() {
        debug!(operation, error = %err, "task item lookup missed");
    } else {
        error!(operation, error = %err, "task item store failure");
    }
}
