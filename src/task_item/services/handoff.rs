//! Two-phase hand-off: record a status change, then relocate the artifact.
//!
//! The phases are not atomic. When the relocation fails after the status was
//! written, [`HandoffError::RelocationFailed`] reports the committed status so
//! the caller can reconcile (retry the move or revert the status).

use crate::artifact::ports::{ArtifactRelocationError, ArtifactRelocator, RelocatedArtifact};
use crate::task_item::{
    domain::{TaskItemDomainError, TaskItemId, TaskItemStatus},
    ports::{TaskItemRepository, TaskItemRepositoryError},
};
use camino::{Utf8Path, Utf8PathBuf};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Request payload for handing off a processed item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandoffRequest {
    id: TaskItemId,
    status: String,
    destination: Utf8PathBuf,
}

impl HandoffRequest {
    /// Creates a hand-off request.
    #[must_use]
    pub fn new(id: TaskItemId, status: impl Into<String>, destination: impl Into<Utf8PathBuf>) -> Self {
        Self {
            id,
            status: status.into(),
            destination: destination.into(),
        }
    }
}

/// Report of a hand-off where both phases succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedHandoff {
    /// Item that was handed off.
    pub id: TaskItemId,
    /// Status recorded in phase one.
    pub status: TaskItemStatus,
    /// `false` when the item was already at the status.
    pub status_changed: bool,
    /// Relocation performed in phase two.
    pub relocated: RelocatedArtifact,
}

/// Errors from a hand-off, tagged by the phase that failed.
#[derive(Debug, Error)]
pub enum HandoffError {
    /// Status validation failed; nothing was written.
    #[error(transparent)]
    Domain(#[from] TaskItemDomainError),
    /// No item has the identifier; nothing was written.
    #[error("task item not found: {0}")]
    NotFound(TaskItemId),
    /// The record phase failed; no relocation was attempted.
    #[error(transparent)]
    Repository(#[from] TaskItemRepositoryError),
    /// The status was recorded but the artifact did not move.
    #[error("task item {id} recorded as {status} but relocation failed: {source}")]
    RelocationFailed {
        /// Item whose record was updated.
        id: TaskItemId,
        /// Status committed in phase one.
        status: TaskItemStatus,
        /// Filesystem failure from phase two.
        source: ArtifactRelocationError,
    },
}

/// Result type for hand-off operations.
pub type HandoffResult<T> = Result<T, HandoffError>;

/// Orchestrates the record-then-relocate hand-off.
#[derive(Clone)]
pub struct TaskItemHandoffService<R, A, C>
where
    R: TaskItemRepository,
    A: ArtifactRelocator,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    relocator: Arc<A>,
    clock: Arc<C>,
}

impl<R, A, C> TaskItemHandoffService<R, A, C>
where
    R: TaskItemRepository,
    A: ArtifactRelocator,
    C: Clock + Send + Sync,
{
    /// Creates a hand-off service.
    #[must_use]
    pub const fn new(repository: Arc<R>, relocator: Arc<A>, clock: Arc<C>) -> Self {
        Self {
            repository,
            relocator,
            clock,
        }
    }

    /// Records `status` on the item, then moves its artifact to the
    /// requested destination.
    ///
    /// # Errors
    ///
    /// Returns [`HandoffError::NotFound`], [`HandoffError::Domain`] or
    /// [`HandoffError::Repository`] when phase one fails, and
    /// [`HandoffError::RelocationFailed`] when phase two fails after the
    /// status was committed.
    pub async fn hand_off(&self, request: HandoffRequest) -> HandoffResult<CompletedHandoff> {
        let HandoffRequest {
            id,
            status,
            destination,
        } = request;
        let target = TaskItemStatus::new(status)?;
        let item = self
            .repository
            .find_by_id(id)
            .await?
            .into_iter()
            .next()
            .ok_or(HandoffError::NotFound(id))?;

        let changed = self
            .repository
            .update_status_bulk(&[id], &target, self.clock.utc())
            .await?;

        let source = Utf8Path::new(&item.fields().pdf_file_path);
        match self.relocator.relocate(source, &destination).await {
            Ok(relocated) => {
                info!(task_item_id = %id, status = %target, "task item handed off");
                Ok(CompletedHandoff {
                    id,
                    status: target,
                    status_changed: changed > 0,
                    relocated,
                })
            }
            Err(source_err) => {
                warn!(task_item_id = %id, status = %target, error = %source_err, "hand-off left status committed without relocation");
                Err(HandoffError::RelocationFailed {
                    id,
                    status: target,
                    source: source_err,
                })
            }
        }
    }
}
