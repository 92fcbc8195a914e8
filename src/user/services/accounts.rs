//! Plain CRUD over user accounts, keyed on email for creation.

use crate::user::{
    domain::{EmailAddress, User, UserDomainError, UserId},
    ports::{UserRepository, UserRepositoryError},
};
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info};

/// Request payload carrying a user's fields.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserRequest {
    #[serde(default)]
    id: String,
    name: String,
    email: String,
}

impl UserRequest {
    /// Creates a user request.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
        }
    }

    /// Replaces the identifier, for callers that carry it outside the body.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Validates every field, collecting all failures.
    fn into_user(self) -> Result<User, Vec<UserDomainError>> {
        let id = UserId::new(self.id);
        let email = EmailAddress::new(self.email);
        match (id, email) {
            (Ok(valid_id), Ok(valid_email)) => {
                User::new(valid_id, self.name, valid_email).map_err(|err| vec![err])
            }
            (id_result, email_result) => {
                let mut errors: Vec<UserDomainError> = id_result
                    .err()
                    .into_iter()
                    .chain(email_result.err())
                    .collect();
                if self.name.trim().is_empty() {
                    errors.push(UserDomainError::EmptyName);
                }
                Err(errors)
            }
        }
    }
}

/// Outcome of a create call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateUserOutcome {
    /// The user was stored.
    Created(User),
    /// A user with the email already exists; nothing was written.
    AlreadyExists(EmailAddress),
}

/// Service-level errors for user operations.
#[derive(Debug, Error)]
pub enum UserServiceError {
    /// One or more fields failed validation.
    #[error("invalid user: {}", format_errors(.0))]
    Validation(Vec<UserDomainError>),
    /// Repository operation failed or reported an expected miss.
    #[error(transparent)]
    Repository(#[from] UserRepositoryError),
}

fn format_errors(errors: &[UserDomainError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type for user service operations.
pub type UserServiceResult<T> = Result<T, UserServiceError>;

/// User account service.
#[derive(Clone)]
pub struct UserService<R>
where
    R: UserRepository,
{
    repository: Arc<R>,
}

impl<R> UserService<R>
where
    R: UserRepository,
{
    /// Creates a user service.
    #[must_use]
    pub const fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Lists every user.
    ///
    /// # Errors
    ///
    /// Returns persistence-layer errors from the repository.
    pub async fn list_all(&self) -> UserServiceResult<Vec<User>> {
        let users = self
            .repository
            .list_all()
            .await
            .inspect_err(|err| error!(error = %err, "user store failure"))?;
        Ok(users)
    }

    /// Creates a user unless one with the same email exists.
    ///
    /// # Errors
    ///
    /// Returns [`UserServiceError::Validation`] for malformed input and
    /// persistence errors.
    pub async fn create(&self, request: UserRequest) -> UserServiceResult<CreateUserOutcome> {
        let user = request.into_user().map_err(UserServiceError::Validation)?;
        match self.repository.insert_if_absent(&user).await {
            Ok(()) => {
                info!(user_id = %user.id(), "user created");
                Ok(CreateUserOutcome::Created(user))
            }
            Err(UserRepositoryError::DuplicateEmail(email)) => {
                debug!(%email, "user already exists");
                Ok(CreateUserOutcome::AlreadyExists(email))
            }
            Err(err) => {
                error!(error = %err, "user store failure");
                Err(err.into())
            }
        }
    }

    /// Replaces a user's name and email.
    ///
    /// # Errors
    ///
    /// Returns [`UserServiceError::Validation`] for malformed input,
    /// [`UserRepositoryError::NotFound`] (wrapped) for unknown ids, and
    /// persistence errors.
    pub async fn update(&self, request: UserRequest) -> UserServiceResult<()> {
        let user = request.into_user().map_err(UserServiceError::Validation)?;
        self.repository
            .update(&user)
            .await
            .inspect_err(log_repository_error)?;
        info!(user_id = %user.id(), "user updated");
        Ok(())
    }

    /// Deletes a user. Task items referencing the user are left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::NotFound`] (wrapped) for unknown ids and
    /// persistence errors.
    pub async fn delete(&self, id: &str) -> UserServiceResult<()> {
        let user_id = UserId::new(id).map_err(|err| UserServiceError::Validation(vec![err]))?;
        self.repository
            .delete(&user_id)
            .await
            .inspect_err(log_repository_error)?;
        info!(%user_id, "user deleted");
        Ok(())
    }
}

fn log_repository_error(err: &UserRepositoryError) {
    match err {
        UserRepositoryError::NotFound(_) | UserRepositoryError::DuplicateEmail(_) => {
            debug!(error = %err, "user lookup missed");
        }
        _ => error!(error = %err, "user store failure"),
    }
}
