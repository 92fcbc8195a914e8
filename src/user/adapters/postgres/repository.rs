//! `PostgreSQL` repository implementation for user records.

use super::{models::UserRow, schema::users};
use crate::storage::PgPool;
use crate::user::{
    domain::{EmailAddress, User, UserId},
    ports::{UserRepository, UserRepositoryError, UserRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

const EMAIL_UNIQUE_INDEX: &str = "idx_users_email_unique";

/// `PostgreSQL`-backed user repository.
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> UserRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> UserRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(UserRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(UserRepositoryError::persistence)?
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn list_all(&self) -> UserRepositoryResult<Vec<User>> {
        self.run_blocking(move |connection| {
            let rows = users::table
                .select(UserRow::as_select())
                .load::<UserRow>(connection)
                .map_err(UserRepositoryError::persistence)?;
            rows.into_iter().map(row_to_user).collect()
        })
        .await
    }

    async fn insert_if_absent(&self, user: &User) -> UserRepositoryResult<()> {
        let row = to_row(user);
        let email = user.email().clone();
        let id = user.id().clone();

        self.run_blocking(move |connection| {
            let existing = users::table
                .filter(users::email.eq(email.as_str()))
                .select(users::id)
                .first::<String>(connection)
                .optional()
                .map_err(UserRepositoryError::persistence)?;
            if existing.is_some() {
                return Err(UserRepositoryError::DuplicateEmail(email));
            }

            diesel::insert_into(users::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| map_write_error(err, &email, &id))?;
            Ok(())
        })
        .await
    }

    async fn update(&self, user: &User) -> UserRepositoryResult<()> {
        let row = to_row(user);
        let email = user.email().clone();
        let id = user.id().clone();

        self.run_blocking(move |connection| {
            let updated_count = diesel::update(users::table.filter(users::id.eq(&row.id)))
                .set((users::name.eq(&row.name), users::email.eq(&row.email)))
                .execute(connection)
                .map_err(|err| map_write_error(err, &email, &id))?;
            if updated_count == 0 {
                return Err(UserRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: &UserId) -> UserRepositoryResult<()> {
        let lookup = id.clone();
        self.run_blocking(move |connection| {
            let deleted_count = diesel::delete(users::table.filter(users::id.eq(lookup.as_str())))
                .execute(connection)
                .map_err(UserRepositoryError::persistence)?;
            if deleted_count == 0 {
                return Err(UserRepositoryError::NotFound(lookup));
            }
            Ok(())
        })
        .await
    }
}

fn to_row(user: &User) -> UserRow {
    UserRow {
        id: user.id().as_str().to_owned(),
        name: user.name().to_owned(),
        email: user.email().as_str().to_owned(),
    }
}

fn row_to_user(row: UserRow) -> UserRepositoryResult<User> {
    let UserRow { id, name, email } = row;
    let parsed_id = UserId::new(id).map_err(UserRepositoryError::invalid_persisted_data)?;
    let parsed_email =
        EmailAddress::new(email).map_err(UserRepositoryError::invalid_persisted_data)?;
    User::new(parsed_id, name, parsed_email).map_err(UserRepositoryError::invalid_persisted_data)
}

fn map_write_error(err: DieselError, email: &EmailAddress, id: &UserId) -> UserRepositoryError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
            if info
                .constraint_name()
                .is_some_and(|name| name == EMAIL_UNIQUE_INDEX) =>
        {
            UserRepositoryError::DuplicateEmail(email.clone())
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            UserRepositoryError::DuplicateId(id.clone())
        }
        _ => UserRepositoryError::persistence(err),
    }
}
