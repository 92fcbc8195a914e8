//! Identifier and validated scalar types for the task item domain.

use super::TaskItemDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a task item record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskItemId(Uuid);

impl TaskItemId {
    /// Creates a new random task item identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a task item identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for TaskItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<Uuid> for TaskItemId {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for TaskItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque identifier of the parent task grouping a set of items.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParentTaskId(String);

impl ParentTaskId {
    /// Creates a validated parent task identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskItemDomainError::MissingField`] when the value is empty
    /// after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskItemDomainError> {
        required_text("task_id", value).map(Self)
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParentTaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Artifact file name used as the de-duplication key for task items.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PdfName(String);

impl PdfName {
    /// Creates a validated artifact name.
    ///
    /// # Errors
    ///
    /// Returns [`TaskItemDomainError::MissingField`] when the value is empty
    /// after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskItemDomainError> {
        required_text("pdf_name", value).map(Self)
    }

    /// Returns the name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for PdfName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for PdfName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Trims `value` and rejects it when nothing remains.
pub(crate) fn required_text(
    field: &'static str,
    value: impl Into<String>,
) -> Result<String, TaskItemDomainError> {
    let raw = value.into();
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TaskItemDomainError::MissingField(field));
    }
    Ok(trimmed.to_owned())
}
