//! Response mapping for task item operations.

use super::ApiResponse;
use crate::task_item::{
    domain::TaskItem,
    ports::TaskItemRepositoryError,
    services::{
        CreateTaskItemOutcome, StatusTransition, TaskItemServiceError, TaskItemServiceResult,
    },
};
use http::StatusCode;

const LIST_FAILED: &str = "Error getting task items";
const ITEM_NOT_FOUND: &str = "Item not found";
const NONE_FOR_TASK_AND_STATUS: &str = "Task items not found for requested task and status.";
const LOOKUP_FAILED: &str = "Error obtaining task items.";
const ALREADY_EXISTS: &str = "Task Item already exists";
const CREATE_FAILED: &str = "Error creating task item";
const TASK_ITEM_NOT_FOUND: &str = "Task_item not found";
const UPDATE_FAILED: &str = "Error updating task";
const TASK_ITEMS_NOT_FOUND: &str = "Task items not found";
const BULK_UPDATE_FAILED: &str = "Error updating tasks";
const DELETE_FAILED: &str = "Error deleting Task item";

/// Maps a list-all result: `200` with the items, `500` on failure.
#[must_use]
pub fn list_response(result: TaskItemServiceResult<Vec<TaskItem>>) -> ApiResponse {
    match result {
        Ok(items) => ApiResponse::json(StatusCode::OK, &items, LIST_FAILED),
        Err(_) => ApiResponse::failure(StatusCode::INTERNAL_SERVER_ERROR, LIST_FAILED),
    }
}

/// Maps a get-by-id result: `200` with a zero- or one-element array, `400`
/// on any lookup error.
#[must_use]
pub fn get_response(result: TaskItemServiceResult<Vec<TaskItem>>) -> ApiResponse {
    match result {
        Ok(items) => ApiResponse::json(StatusCode::OK, &items, ITEM_NOT_FOUND),
        Err(_) => ApiResponse::failure(StatusCode::BAD_REQUEST, ITEM_NOT_FOUND),
    }
}

/// Maps a task-and-status lookup: `400` when nothing matches, `500` on
/// store failure.
#[must_use]
pub fn by_task_and_status_response(result: TaskItemServiceResult<Vec<TaskItem>>) -> ApiResponse {
    match result {
        Ok(items) => ApiResponse::json(StatusCode::OK, &items, LOOKUP_FAILED),
        Err(TaskItemServiceError::Repository(TaskItemRepositoryError::NoMatchingItems {
            ..
        })) => ApiResponse::message(StatusCode::BAD_REQUEST, NONE_FOR_TASK_AND_STATUS),
        Err(err) if err.is_validation() => validation_failure(&err),
        Err(_) => ApiResponse::failure(StatusCode::INTERNAL_SERVER_ERROR, LOOKUP_FAILED),
    }
}

/// Maps a create result. A duplicate PDF name answers `303`.
#[must_use]
pub fn create_response(result: TaskItemServiceResult<CreateTaskItemOutcome>) -> ApiResponse {
    match result {
        Ok(CreateTaskItemOutcome::Created(_)) => ApiResponse::ok(),
        Ok(CreateTaskItemOutcome::AlreadyExists(_)) => {
            ApiResponse::failure(StatusCode::SEE_OTHER, ALREADY_EXISTS)
        }
        Err(err) if err.is_validation() => validation_failure(&err),
        Err(_) => ApiResponse::failure(StatusCode::INTERNAL_SERVER_ERROR, CREATE_FAILED),
    }
}

/// Maps a full-update result.
#[must_use]
pub fn update_response(result: TaskItemServiceResult<()>) -> ApiResponse {
    match result {
        Ok(()) => ApiResponse::ok(),
        Err(TaskItemServiceError::Repository(TaskItemRepositoryError::NotFound(_))) => {
            ApiResponse::message(StatusCode::BAD_REQUEST, TASK_ITEM_NOT_FOUND)
        }
        Err(TaskItemServiceError::Repository(TaskItemRepositoryError::DuplicatePdfName(_))) => {
            ApiResponse::failure(StatusCode::SEE_OTHER, ALREADY_EXISTS)
        }
        Err(err) if err.is_validation() => validation_failure(&err),
        Err(_) => ApiResponse::failure(StatusCode::INTERNAL_SERVER_ERROR, UPDATE_FAILED),
    }
}

/// Maps a bulk status transition. Zero affected rows answers `400`.
#[must_use]
pub fn transition_response(result: TaskItemServiceResult<StatusTransition>) -> ApiResponse {
    match result {
        Ok(_) => ApiResponse::ok(),
        Err(TaskItemServiceError::NothingTransitioned(_)) => {
            ApiResponse::message(StatusCode::BAD_REQUEST, TASK_ITEMS_NOT_FOUND)
        }
        Err(err) if err.is_validation() => validation_failure(&err),
        Err(_) => ApiResponse::failure(StatusCode::INTERNAL_SERVER_ERROR, BULK_UPDATE_FAILED),
    }
}

/// Maps a delete result: `204` without a body on success.
#[must_use]
pub fn delete_response(result: TaskItemServiceResult<()>) -> ApiResponse {
    match result {
        Ok(()) => ApiResponse::empty(StatusCode::NO_CONTENT),
        Err(TaskItemServiceError::Repository(TaskItemRepositoryError::NotFound(_))) => {
            ApiResponse::message(StatusCode::BAD_REQUEST, TASK_ITEM_NOT_FOUND)
        }
        Err(_) => ApiResponse::failure(StatusCode::INTERNAL_SERVER_ERROR, DELETE_FAILED),
    }
}

fn validation_failure(err: &TaskItemServiceError) -> ApiResponse {
    ApiResponse::failure(StatusCode::BAD_REQUEST, err.to_string())
}
