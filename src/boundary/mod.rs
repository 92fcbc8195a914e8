//! Translation of service outcomes into status codes and JSON bodies.
//!
//! No routing lives here: a transport layer passes each service result to
//! the matching function and writes the returned [`ApiResponse`]. Store
//! failures are reduced to fixed messages; their detail goes to the log.

pub mod artifacts;
pub mod task_items;
pub mod users;

use http::StatusCode;
use serde::Serialize;
use serde_json::{Value, json};
use tracing::error;

/// Status code plus optional JSON body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// JSON body; `None` for bodiless responses such as `204`.
    pub body: Option<Value>,
}

impl ApiResponse {
    /// Creates a response with a body.
    #[must_use]
    pub const fn new(status: StatusCode, body: Value) -> Self {
        Self {
            status,
            body: Some(body),
        }
    }

    /// Creates a bodiless response.
    #[must_use]
    pub const fn empty(status: StatusCode) -> Self {
        Self { status, body: None }
    }

    /// `{ "message": text }`.
    #[must_use]
    pub fn message(status: StatusCode, text: impl Into<String>) -> Self {
        Self::new(status, json!({ "message": text.into() }))
    }

    /// `{ "message": text, "works": false }`.
    #[must_use]
    pub fn failure(status: StatusCode, text: impl Into<String>) -> Self {
        Self::new(status, json!({ "message": text.into(), "works": false }))
    }

    /// `200 { "message": "Ok" }`.
    #[must_use]
    pub fn ok() -> Self {
        Self::message(StatusCode::OK, "Ok")
    }

    /// Serialises `payload` with `status`, falling back to a `500` failure
    /// carrying `fallback` when serialisation fails.
    #[must_use]
    pub fn json(status: StatusCode, payload: &impl Serialize, fallback: &str) -> Self {
        match serde_json::to_value(payload) {
            Ok(body) => Self::new(status, body),
            Err(err) => {
                error!(error = %err, "response serialisation failed");
                Self::failure(StatusCode::INTERNAL_SERVER_ERROR, fallback)
            }
        }
    }
}
