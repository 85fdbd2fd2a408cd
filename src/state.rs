use std::sync::Arc;

use crate::config::AppConfig;
use crate::storage::{LocalUploadStore, UploadStore};
use crate::uploads::classifier::{Classifier, PlaceholderClassifier};
use crate::users::repo::{MySqlUserRepo, UserRepository};

/// Everything a handler needs, built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub uploads: Arc<dyn UploadStore>,
    pub classifier: Arc<dyn Classifier>,
}

impl AppState {
    pub async fn init(config: &AppConfig) -> anyhow::Result<Self> {
        let repo = MySqlUserRepo::connect(&config.db).await?;
        repo.ensure_schema().await?;

        let uploads = LocalUploadStore::new(&config.upload_dir)?;
        tracing::info!(upload_dir = %uploads.root().display(), "upload store ready");

        Ok(Self::from_parts(
            Arc::new(repo),
            Arc::new(uploads),
            Arc::new(PlaceholderClassifier),
        ))
    }

    pub fn from_parts(
        users: Arc<dyn UserRepository>,
        uploads: Arc<dyn UploadStore>,
        classifier: Arc<dyn Classifier>,
    ) -> Self {
        Self {
            users,
            uploads,
            classifier,
        }
    }

    /// In-memory users, uploads under `upload_dir`, placeholder classifier.
    #[cfg(test)]
    pub fn fake(upload_dir: &std::path::Path) -> Self {
        use crate::users::repo::memory::MemoryUserRepo;

        let uploads = LocalUploadStore::new(upload_dir).expect("test upload dir");
        Self::from_parts(
            Arc::new(MemoryUserRepo::default()),
            Arc::new(uploads),
            Arc::new(PlaceholderClassifier),
        )
    }
}
