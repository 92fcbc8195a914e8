//! Port contract for artifact relocation.

use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Result type for artifact relocation.
pub type ArtifactRelocationResult<T> = Result<T, ArtifactRelocationError>;

/// Successful relocation report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelocatedArtifact {
    /// The path the artifact was moved from.
    pub source: Utf8PathBuf,
    /// The path the artifact now lives at.
    pub destination: Utf8PathBuf,
}

/// Moves produced artifacts between locations.
///
/// Implementations never read or write task item records. Callers pairing a
/// relocation with a record update own any reconciliation between the two.
#[async_trait]
pub trait ArtifactRelocator: Send + Sync {
    /// Moves the file at `source` to `destination`, replacing any file
    /// already there.
    ///
    /// # Errors
    ///
    /// Returns [`ArtifactRelocationError::InvalidPath`] when either path has
    /// no file-name component and [`ArtifactRelocationError::Io`] when the
    /// filesystem rejects the move.
    async fn relocate(
        &self,
        source: &Utf8Path,
        destination: &Utf8Path,
    ) -> ArtifactRelocationResult<RelocatedArtifact>;
}

/// Errors returned by artifact relocators.
#[derive(Debug, Clone, Error)]
pub enum ArtifactRelocationError {
    /// The path does not name a file.
    #[error("path must include a file name: {0}")]
    InvalidPath(Utf8PathBuf),

    /// The filesystem operation failed.
    #[error("{0}")]
    Io(Arc<std::io::Error>),
}

impl ArtifactRelocationError {
    /// Wraps a filesystem error.
    #[must_use]
    pub fn io(err: std::io::Error) -> Self {
        Self::Io(Arc::new(err))
    }
}

impl From<std::io::Error> for ArtifactRelocationError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err)
    }
}
