//! Shared fixtures for in-memory integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use task_item_store::task_item::{
    adapters::memory::InMemoryTaskItemRepository,
    domain::TaskItemId,
    services::{CreateTaskItemOutcome, TaskItemRequest, TaskItemService},
};
use task_item_store::user::{adapters::memory::InMemoryUserRepository, services::UserService};

/// Task item service over an in-memory store.
pub type TaskItems = TaskItemService<InMemoryTaskItemRepository, DefaultClock>;

/// User service over an in-memory store.
pub type Users = UserService<InMemoryUserRepository>;

/// Provides a fresh task item service for each test.
#[fixture]
pub fn task_items() -> TaskItems {
    TaskItemService::new(
        Arc::new(InMemoryTaskItemRepository::new()),
        Arc::new(DefaultClock),
    )
}

/// Provides a fresh user service for each test.
#[fixture]
pub fn users() -> Users {
    UserService::new(Arc::new(InMemoryUserRepository::new()))
}

/// Builds a complete task item request.
#[must_use]
pub fn item_request(pdf_name: &str, status: &str, task_id: &str) -> TaskItemRequest {
    TaskItemRequest::new(
        "scanner-01",
        format!("/inbox/{pdf_name}"),
        pdf_name,
        status,
        "u-1",
        task_id,
    )
}

/// Creates an item and returns its identifier.
///
/// # Errors
///
/// Returns an error if the service fails or reports the PDF name as taken.
pub async fn seed_item(
    service: &TaskItems,
    pdf_name: &str,
    status: &str,
    task_id: &str,
) -> eyre::Result<TaskItemId> {
    match service
        .create(item_request(pdf_name, status, task_id))
        .await?
    {
        CreateTaskItemOutcome::Created(item) => Ok(item.id()),
        CreateTaskItemOutcome::AlreadyExists(name) => {
            Err(eyre::eyre!("pdf name {name} already in use"))
        }
    }
}
