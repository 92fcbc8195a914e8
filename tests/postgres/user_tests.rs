//! User adapter tests against a real `PostgreSQL` store.

use crate::postgres::helpers::{TestDatabase, test_runtime};
use pg_embedded_setup_unpriv::TestCluster;
use pg_embedded_setup_unpriv::test_support::shared_test_cluster;
use rstest::rstest;
use task_item_store::user::{
    adapters::postgres::PostgresUserRepository,
    domain::{EmailAddress, User, UserId},
    ports::{UserRepository, UserRepositoryError},
};

fn user(id: &str, name: &str, email: &str) -> eyre::Result<User> {
    Ok(User::new(UserId::new(id)?, name, EmailAddress::new(email)?)?)
}

#[rstest]
fn insert_with_taken_email_is_rejected(
    shared_test_cluster: &'static TestCluster,
) -> eyre::Result<()> {
    let database = TestDatabase::create(shared_test_cluster, "test_user_dup")?;
    let repository = PostgresUserRepository::new(database.pool()?);
    let rt = test_runtime()?;
    rt.block_on(repository.insert_if_absent(&user("u-1", "Ada", "ada@example.com")?))?;

    let result =
        rt.block_on(repository.insert_if_absent(&user("u-2", "Imposter", "ada@example.com")?));

    eyre::ensure!(
        matches!(result, Err(UserRepositoryError::DuplicateEmail(_))),
        "expected DuplicateEmail, got {result:?}"
    );
    let listed = rt.block_on(repository.list_all())?;
    eyre::ensure!(listed.len() == 1, "expected one user, got {listed:?}");
    Ok(())
}

#[rstest]
fn update_to_another_users_email_hits_unique_index(
    shared_test_cluster: &'static TestCluster,
) -> eyre::Result<()> {
    let database = TestDatabase::create(shared_test_cluster, "test_user_rename")?;
    let repository = PostgresUserRepository::new(database.pool()?);
    let rt = test_runtime()?;
    rt.block_on(repository.insert_if_absent(&user("u-1", "Ada", "ada@example.com")?))?;
    rt.block_on(repository.insert_if_absent(&user("u-2", "Grace", "grace@example.com")?))?;

    let result = rt.block_on(repository.update(&user("u-2", "Grace", "ada@example.com")?));

    eyre::ensure!(
        matches!(result, Err(UserRepositoryError::DuplicateEmail(_))),
        "expected DuplicateEmail, got {result:?}"
    );
    Ok(())
}

#[rstest]
fn update_of_missing_user_with_taken_email_reports_not_found(
    shared_test_cluster: &'static TestCluster,
) -> eyre::Result<()> {
    let database = TestDatabase::create(shared_test_cluster, "test_user_ghost")?;
    let repository = PostgresUserRepository::new(database.pool()?);
    let rt = test_runtime()?;
    rt.block_on(repository.insert_if_absent(&user("u-1", "Ada", "ada@example.com")?))?;

    let result = rt.block_on(repository.update(&user("ghost", "Nobody", "ada@example.com")?));

    eyre::ensure!(
        matches!(&result, Err(UserRepositoryError::NotFound(id)) if id.as_str() == "ghost"),
        "expected NotFound, got {result:?}"
    );
    Ok(())
}

#[rstest]
fn deleting_twice_reports_not_found(
    shared_test_cluster: &'static TestCluster,
) -> eyre::Result<()> {
    let database = TestDatabase::create(shared_test_cluster, "test_user_delete")?;
    let repository = PostgresUserRepository::new(database.pool()?);
    let rt = test_runtime()?;
    let ada = user("u-1", "Ada", "ada@example.com")?;
    rt.block_on(repository.insert_if_absent(&ada))?;

    rt.block_on(repository.delete(ada.id()))?;
    let again = rt.block_on(repository.delete(ada.id()));

    eyre::ensure!(
        matches!(again, Err(UserRepositoryError::NotFound(_))),
        "expected NotFound, got {again:?}"
    );
    Ok(())
}
