//! Filesystem photo storage.

use std::path::PathBuf;

use async_trait::async_trait;

use wl_core::errors::DomainError;
use wl_core::services::PhotoStore;
use wl_shared::UploadConfig;

/// Photo store writing into the configured upload directory
pub struct FsPhotoStore {
    root: PathBuf,
}

impl FsPhotoStore {
    pub fn new(config: &UploadConfig) -> Self {
        Self {
            root: PathBuf::from(&config.file_upload_path),
        }
    }
}

#[async_trait]
impl PhotoStore for FsPhotoStore {
    async fn save(&self, filename: &str, bytes: &[u8]) -> Result<(), DomainError> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| DomainError::internal(e.to_string()))?;

        tokio::fs::write(self.root.join(filename), bytes)
            .await
            .map_err(|e| DomainError::internal(e.to_string()))
    }
}
