//! Repository port for user account records.

use crate::user::domain::{EmailAddress, User, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for user repository operations.
pub type UserRepositoryResult<T> = Result<T, UserRepositoryError>;

/// User persistence contract.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Returns every user.
    async fn list_all(&self) -> UserRepositoryResult<Vec<User>>;

    /// Stores `user` unless another user already has its email address.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::DuplicateEmail`] when the email is taken
    /// and [`UserRepositoryError::DuplicateId`] when the identifier is.
    async fn insert_if_absent(&self, user: &User) -> UserRepositoryResult<()>;

    /// Replaces the name and email of an existing user.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::NotFound`] when no user has the id.
    async fn update(&self, user: &User) -> UserRepositoryResult<()>;

    /// Deletes a user.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::NotFound`] when no user has the id.
    async fn delete(&self, id: &UserId) -> UserRepositoryResult<()>;
}

/// Errors returned by user repository implementations.
#[derive(Debug, Clone, Error)]
pub enum UserRepositoryError {
    /// No user has the identifier.
    #[error("user not found: {0}")]
    NotFound(UserId),

    /// Another user already has the email address.
    #[error("duplicate user email: {0}")]
    DuplicateEmail(EmailAddress),

    /// Another user already has the identifier.
    #[error("duplicate user id: {0}")]
    DuplicateId(UserId),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted user data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl UserRepositoryError {
    /// Wraps persisted-data decoding or validation failures.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence-layer failure.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
