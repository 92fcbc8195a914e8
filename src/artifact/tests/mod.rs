//! Filesystem relocator tests against a scratch directory.

use std::fs;
use std::io;

use crate::artifact::{
    adapters::FsArtifactRelocator,
    ports::{ArtifactRelocationError, ArtifactRelocator},
};
use camino::{Utf8Path, Utf8PathBuf};
use rstest::{fixture, rstest};
use tempfile::TempDir;

struct Scratch {
    dir: TempDir,
}

impl Scratch {
    fn path(&self, name: &str) -> Utf8PathBuf {
        Utf8Path::from_path(self.dir.path())
            .expect("temp dir path should be UTF-8")
            .join(name)
    }
}

#[fixture]
fn scratch() -> Scratch {
    Scratch {
        dir: TempDir::new().expect("temp dir should be created"),
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn relocate_moves_file_and_echoes_source(scratch: Scratch) {
    let source = scratch.path("a.pdf");
    let destination = scratch.path("b.pdf");
    fs::write(&source, b"payload").expect("source should be written");

    let moved = FsArtifactRelocator::new()
        .relocate(&source, &destination)
        .await
        .expect("relocation should succeed");

    assert_eq!(moved.source, source);
    assert_eq!(moved.destination, destination);
    assert!(!source.exists());
    assert_eq!(fs::read(&destination).expect("destination should exist"), b"payload");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn relocate_into_subdirectory(scratch: Scratch) {
    let source = scratch.path("a.pdf");
    fs::create_dir(scratch.path("done")).expect("subdirectory should be created");
    let destination = scratch.path("done").join("a.pdf");
    fs::write(&source, b"payload").expect("source should be written");

    FsArtifactRelocator::new()
        .relocate(&source, &destination)
        .await
        .expect("relocation should succeed");

    assert!(destination.exists());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn relocate_replaces_existing_destination(scratch: Scratch) {
    let source = scratch.path("a.pdf");
    let destination = scratch.path("b.pdf");
    fs::write(&source, b"new").expect("source should be written");
    fs::write(&destination, b"old").expect("destination should be written");

    FsArtifactRelocator::new()
        .relocate(&source, &destination)
        .await
        .expect("relocation should succeed");

    assert_eq!(fs::read(&destination).expect("destination should exist"), b"new");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_source_surfaces_io_failure(scratch: Scratch) {
    let source = scratch.path("missing.pdf");
    let destination = scratch.path("b.pdf");

    let result = FsArtifactRelocator::new()
        .relocate(&source, &destination)
        .await;

    let Err(ArtifactRelocationError::Io(err)) = result else {
        panic!("expected an I/O failure");
    };
    assert_eq!(err.kind(), io::ErrorKind::NotFound);
    assert!(!destination.exists());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn path_without_file_name_is_rejected(scratch: Scratch) {
    let source = scratch.path("a.pdf");
    fs::write(&source, b"payload").expect("source should be written");

    let result = FsArtifactRelocator::new()
        .relocate(&source, Utf8Path::new("/"))
        .await;

    assert!(matches!(
        result,
        Err(ArtifactRelocationError::InvalidPath(path)) if path.as_str() == "/"
    ));
    assert!(source.exists());
}
