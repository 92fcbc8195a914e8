//! Error types for task item domain validation.

use thiserror::Error;

/// Errors returned while constructing domain task item values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskItemDomainError {
    /// A required text field was absent or blank.
    #[error("required field '{0}' must not be empty")]
    MissingField(&'static str),

    /// The status label is blank.
    #[error("task item status must not be empty")]
    EmptyStatus,

    /// The status label exceeds the persisted column width.
    #[error("task item status '{0}' exceeds {max} characters", max = super::TaskItemStatus::MAX_LENGTH)]
    StatusTooLong(String),
}
