//! Filesystem artifact store

use std::path::{Component, Path, PathBuf};

use adops_core::ArtifactStore;
use adops_domain::{AdOpsError, Result};
use async_trait::async_trait;
use tracing::info;

use crate::errors::InfraError;

/// Writes artifacts into a single output directory, creating it on demand.
#[derive(Debug, Clone)]
pub struct FsArtifactStore {
    root: PathBuf,
}

impl FsArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl ArtifactStore for FsArtifactStore {
    async fn persist(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
        let mut components = Path::new(file_name).components();
        let is_plain_name = matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        );
        if !is_plain_name {
            return Err(AdOpsError::Validation(format!(
                "artifact name must be a plain file name: {file_name}"
            )));
        }

        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|err| AdOpsError::from(InfraError::from(err)))?;

        let path = self.root.join(file_name);
        tokio::fs::write(&path, bytes).await.map_err(|err| AdOpsError::from(InfraError::from(err)))?;

        info!(path = %path.display(), bytes = bytes.len(), "Artifact written");
        Ok(path)
    }
}
