//! Capability-scoped filesystem relocator.

use crate::artifact::ports::{
    ArtifactRelocationError, ArtifactRelocationResult, ArtifactRelocator, RelocatedArtifact,
};
use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::io;
use tracing::{error, info};

/// Relocates artifacts by renaming them through parent-directory handles.
///
/// A rename across filesystems falls back to copy-then-remove.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsArtifactRelocator;

impl FsArtifactRelocator {
    /// Creates a filesystem relocator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ArtifactRelocator for FsArtifactRelocator {
    async fn relocate(
        &self,
        source: &Utf8Path,
        destination: &Utf8Path,
    ) -> ArtifactRelocationResult<RelocatedArtifact> {
        let from = source.to_path_buf();
        let to = destination.to_path_buf();
        let result = tokio::task::spawn_blocking(move || -> ArtifactRelocationResult<RelocatedArtifact> {
            move_file(&from, &to)?;
            Ok(RelocatedArtifact {
                source: from,
                destination: to,
            })
        })
        .await
        .map_err(|err| ArtifactRelocationError::io(io::Error::other(err)))?;

        match &result {
            Ok(moved) => info!(source = %moved.source, destination = %moved.destination, "artifact relocated"),
            Err(err) => error!(%source, %destination, error = %err, "artifact relocation failed"),
        }
        result
    }
}

fn move_file(source: &Utf8Path, destination: &Utf8Path) -> ArtifactRelocationResult<()> {
    let (source_dir, source_name) = open_parent_dir(source)?;
    let (destination_dir, destination_name) = open_parent_dir(destination)?;

    match source_dir.rename(source_name, &destination_dir, destination_name) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::CrossesDevices => {
            source_dir.copy(source_name, &destination_dir, destination_name)?;
            source_dir.remove_file(source_name)?;
            Ok(())
        }
        Err(err) => Err(ArtifactRelocationError::io(err)),
    }
}

fn open_parent_dir(path: &Utf8Path) -> ArtifactRelocationResult<(Dir, &str)> {
    let file_name = path
        .file_name()
        .ok_or_else(|| ArtifactRelocationError::InvalidPath(Utf8PathBuf::from(path)))?;
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let dir = Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, file_name))
}
