//! Open-vocabulary processing status for task items.

use super::TaskItemDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Processing status label attached to a task item.
///
/// The vocabulary is open: any non-blank label is accepted and persisted as
/// text. Transition rules are applied by the bulk status operation in
/// [`crate::task_item::services::TaskItemService::transition_status`], not
/// here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskItemStatus(String);

impl TaskItemStatus {
    /// Width of the `status` column.
    pub const MAX_LENGTH: usize = 50;

    /// Creates a validated status label.
    ///
    /// # Errors
    ///
    /// Returns [`TaskItemDomainError::EmptyStatus`] for blank labels and
    /// [`TaskItemDomainError::StatusTooLong`] when the trimmed label is
    /// longer than [`Self::MAX_LENGTH`] characters.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskItemDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TaskItemDomainError::EmptyStatus);
        }
        if trimmed.chars().count() > Self::MAX_LENGTH {
            return Err(TaskItemDomainError::StatusTooLong(trimmed.to_owned()));
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the canonical storage representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TaskItemStatus {
    type Error = TaskItemDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TaskItemStatus> for String {
    fn from(status: TaskItemStatus) -> Self {
        status.0
    }
}

impl fmt::Display for TaskItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
