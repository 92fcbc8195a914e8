//! Filesystem adapter for artifact relocation.

mod filesystem;

pub use filesystem::FsArtifactRelocator;
