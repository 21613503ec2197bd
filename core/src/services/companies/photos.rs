//! Photo storage port.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::errors::DomainError;

/// Persists uploaded photos under their derived filename
#[async_trait]
pub trait PhotoStore: Send + Sync {
    async fn save(&self, filename: &str, bytes: &[u8]) -> Result<(), DomainError>;
}

/// Mock photo store keeping uploads in memory
#[derive(Clone, Default)]
pub struct MockPhotoStore {
    files: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl MockPhotoStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn stored(&self, filename: &str) -> Option<Vec<u8>> {
        self.files.read().await.get(filename).cloned()
    }
}

#[async_trait]
impl PhotoStore for MockPhotoStore {
    async fn save(&self, filename: &str, bytes: &[u8]) -> Result<(), DomainError> {
        self.files
            .write()
            .await
            .insert(filename.to_string(), bytes.to_vec());
        Ok(())
    }
}
