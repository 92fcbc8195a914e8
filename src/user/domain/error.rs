//! Error types for user domain validation.

use thiserror::Error;

/// Errors returned while constructing user values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserDomainError {
    /// The user identifier is blank.
    #[error("user id must not be empty")]
    EmptyId,

    /// The display name is blank.
    #[error("user name must not be empty")]
    EmptyName,

    /// The email address is not of the form `local@domain.tld`.
    #[error("invalid email address '{0}'")]
    InvalidEmail(String),
}
