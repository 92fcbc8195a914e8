//! Domain model for user account records.

mod email;
mod error;
mod user;

pub use email::EmailAddress;
pub use error::UserDomainError;
pub use user::{User, UserId};
