//! Application services for user account management.

mod accounts;

pub use accounts::{
    CreateUserOutcome, UserRequest, UserService, UserServiceError, UserServiceResult,
};
