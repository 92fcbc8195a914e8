//! Response mapping for artifact relocation.

use super::ApiResponse;
use crate::artifact::ports::{ArtifactRelocationResult, RelocatedArtifact};
use http::StatusCode;
use serde_json::json;

/// Maps a relocation result: `200` echoing the source path, `400` with the
/// underlying error text otherwise.
#[must_use]
pub fn relocate_response(result: ArtifactRelocationResult<RelocatedArtifact>) -> ApiResponse {
    match result {
        Ok(relocated) => ApiResponse::new(
            StatusCode::OK,
            json!({
                "message": "Successfully moved",
                "fileName": relocated.source.as_str(),
            }),
        ),
        Err(err) => ApiResponse::message(StatusCode::BAD_REQUEST, err.to_string()),
    }
}
