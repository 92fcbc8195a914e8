//! Task item record and its mutable field set.

use super::{ParentTaskId, PdfName, TaskItemId, TaskItemStatus};
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Every field of a task item that a full update replaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskItemFields {
    /// Label of the worker or machine that produced the item.
    pub machine_name: String,
    /// Source location of the produced artifact.
    pub pdf_file_path: String,
    /// Artifact name; unique across task items.
    pub pdf_name: PdfName,
    /// Current processing status.
    pub status: TaskItemStatus,
    /// User the item belongs to. A reference only; users are never mutated
    /// through task items.
    pub owner_user_id: UserId,
    /// Parent task grouping.
    pub task_id: ParentTaskId,
    /// Opaque payload produced by upstream processing.
    pub data: Value,
    /// Opaque payload describing who or what performed the work.
    pub performer_data: Value,
}

/// Persisted task item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskItem {
    id: TaskItemId,
    #[serde(flatten)]
    fields: TaskItemFields,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskItemData {
    /// Persisted identifier.
    pub id: TaskItemId,
    /// Persisted field values.
    pub fields: TaskItemFields,
    /// Persisted last-update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl TaskItem {
    /// Creates a new task item with a fresh identifier.
    #[must_use]
    pub fn new(fields: TaskItemFields, clock: &impl Clock) -> Self {
        Self {
            id: TaskItemId::new(),
            fields,
            updated_at: clock.utc(),
        }
    }

    /// Reconstructs a task item from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskItemData) -> Self {
        Self {
            id: data.id,
            fields: data.fields,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task item identifier.
    #[must_use]
    pub const fn id(&self) -> TaskItemId {
        self.id
    }

    /// Returns all mutable fields.
    #[must_use]
    pub const fn fields(&self) -> &TaskItemFields {
        &self.fields
    }

    /// Returns the artifact name.
    #[must_use]
    pub const fn pdf_name(&self) -> &PdfName {
        &self.fields.pdf_name
    }

    /// Returns the current status.
    #[must_use]
    pub const fn status(&self) -> &TaskItemStatus {
        &self.fields.status
    }

    /// Returns the parent task identifier.
    #[must_use]
    pub const fn task_id(&self) -> &ParentTaskId {
        &self.fields.task_id
    }

    /// Returns the owning user reference.
    #[must_use]
    pub const fn owner_user_id(&self) -> &UserId {
        &self.fields.owner_user_id
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replaces every mutable field and refreshes the update timestamp.
    pub fn replace_fields(&mut self, fields: TaskItemFields, updated_at: DateTime<Utc>) {
        self.fields = fields;
        self.updated_at = updated_at;
    }

    /// Moves the item to `status`.
    ///
    /// Returns `false` and leaves the item untouched when it is already at
    /// `status`.
    pub fn set_status(&mut self, status: &TaskItemStatus, updated_at: DateTime<Utc>) -> bool {
        if &self.fields.status == status {
            return false;
        }
        self.fields.status = status.clone();
        self.updated_at = updated_at;
        true
    }
}
