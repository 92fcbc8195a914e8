//! In-memory repository for user tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::user::{
    domain::{User, UserId},
    ports::{UserRepository, UserRepositoryError, UserRepositoryResult},
};

/// Thread-safe in-memory user repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl InMemoryUserRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl std::fmt::Display) -> UserRepositoryError {
    UserRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn list_all(&self) -> UserRepositoryResult<Vec<User>> {
        let users = self.users.read().map_err(lock_error)?;
        Ok(users.values().cloned().collect())
    }

    async fn insert_if_absent(&self, user: &User) -> UserRepositoryResult<()> {
        let mut users = self.users.write().map_err(lock_error)?;
        if users.values().any(|existing| existing.email() == user.email()) {
            return Err(UserRepositoryError::DuplicateEmail(user.email().clone()));
        }
        if users.contains_key(user.id()) {
            return Err(UserRepositoryError::DuplicateId(user.id().clone()));
        }
        users.insert(user.id().clone(), user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> UserRepositoryResult<()> {
        let mut users = self.users.write().map_err(lock_error)?;
        if !users.contains_key(user.id()) {
            return Err(UserRepositoryError::NotFound(user.id().clone()));
        }
        if users
            .values()
            .any(|existing| existing.email() == user.email() && existing.id() != user.id())
        {
            return Err(UserRepositoryError::DuplicateEmail(user.email().clone()));
        }
        users.insert(user.id().clone(), user.clone());
        Ok(())
    }

    async fn delete(&self, id: &UserId) -> UserRepositoryResult<()> {
        let mut users = self.users.write().map_err(lock_error)?;
        users
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| UserRepositoryError::NotFound(id.clone()))
    }
}
