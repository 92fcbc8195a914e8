//! Response mapping for user account operations.

use super::ApiResponse;
use crate::user::{
    domain::{User, UserDomainError},
    ports::UserRepositoryError,
    services::{CreateUserOutcome, UserServiceError, UserServiceResult},
};
use http::StatusCode;
use serde_json::json;

const LIST_FAILED: &str = "Error getting users";
const CREATED: &str = "User created!";
const ALREADY_EXISTS: &str = "User already exists";
const CREATE_FAILED: &str = "Error creating user";
const UPDATED: &str = "Updated";
const NOT_FOUND: &str = "User not found";
const UPDATE_FAILED: &str = "Error updating User";
const DELETE_FAILED: &str = "Error deleting user";

/// Maps a list-all result.
#[must_use]
pub fn list_response(result: UserServiceResult<Vec<User>>) -> ApiResponse {
    match result {
        Ok(users) => ApiResponse::json(StatusCode::OK, &users, LIST_FAILED),
        Err(_) => ApiResponse::failure(StatusCode::INTERNAL_SERVER_ERROR, LIST_FAILED),
    }
}

/// Maps a create result. An existing email still answers `200`, flagged
/// with `works: false`.
#[must_use]
pub fn create_response(result: UserServiceResult<CreateUserOutcome>) -> ApiResponse {
    match result {
        Ok(CreateUserOutcome::Created(_)) => ApiResponse::message(StatusCode::OK, CREATED),
        Ok(CreateUserOutcome::AlreadyExists(_)) => {
            ApiResponse::failure(StatusCode::OK, ALREADY_EXISTS)
        }
        Err(UserServiceError::Validation(errors)) => validation_failure(&errors),
        Err(_) => ApiResponse::failure(StatusCode::INTERNAL_SERVER_ERROR, CREATE_FAILED),
    }
}

/// Maps an update result.
#[must_use]
pub fn update_response(result: UserServiceResult<()>) -> ApiResponse {
    match result {
        Ok(()) => ApiResponse::message(StatusCode::OK, UPDATED),
        Err(UserServiceError::Repository(UserRepositoryError::NotFound(_))) => {
            ApiResponse::message(StatusCode::BAD_REQUEST, NOT_FOUND)
        }
        Err(UserServiceError::Validation(errors)) => validation_failure(&errors),
        Err(_) => ApiResponse::failure(StatusCode::INTERNAL_SERVER_ERROR, UPDATE_FAILED),
    }
}

/// Maps a delete result: `204` without a body on success.
#[must_use]
pub fn delete_response(result: UserServiceResult<()>) -> ApiResponse {
    match result {
        Ok(()) => ApiResponse::empty(StatusCode::NO_CONTENT),
        Err(UserServiceError::Repository(UserRepositoryError::NotFound(_))) => {
            ApiResponse::message(StatusCode::BAD_REQUEST, NOT_FOUND)
        }
        Err(UserServiceError::Validation(errors)) => validation_failure(&errors),
        Err(_) => ApiResponse::failure(StatusCode::INTERNAL_SERVER_ERROR, DELETE_FAILED),
    }
}

fn validation_failure(errors: &[UserDomainError]) -> ApiResponse {
    let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
    ApiResponse::new(StatusCode::BAD_REQUEST, json!({ "errors": messages }))
}
