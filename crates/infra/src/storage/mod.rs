//! Local persistence for downloaded artifacts

pub mod artifacts;

pub use artifacts::FsArtifactStore;
