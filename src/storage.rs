use std::path::{Path, PathBuf};

use anyhow::Context;
use axum::async_trait;
use bytes::Bytes;

#[async_trait]
pub trait UploadStore: Send + Sync {
    /// Writes `body` under `file_name` and returns where it landed.
    /// `file_name` must already be sanitized to a single path component.
    async fn put(&self, file_name: &str, body: Bytes) -> anyhow::Result<PathBuf>;
}

/// Upload store backed by a directory on the local filesystem.
#[derive(Clone, Debug)]
pub struct LocalUploadStore {
    root: PathBuf,
}

impl LocalUploadStore {
    /// Opens the store, creating `root` if it does not exist.
    pub fn new(root: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)
            .with_context(|| format!("create upload dir {}", root.display()))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl UploadStore for LocalUploadStore {
    async fn put(&self, file_name: &str, body: Bytes) -> anyhow::Result<PathBuf> {
        let path = self.root.join(file_name);
        tokio::fs::write(&path, &body)
            .await
            .with_context(|| format!("write upload {}", path.display()))?;
        Ok(path)
    }
}
