use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;
use wikivid_core::{
    is_plain_filename, ArtifactReference, ArtifactStore, Error, Result, Title, VideoArtifact,
};

/// Keeps videos in process memory. Contents are lost on restart.
#[derive(Debug, Clone, Default)]
pub struct MemoryArtifactStore {
    videos: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl MemoryArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.videos.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.videos.read().await.is_empty()
    }
}

#[async_trait]
impl ArtifactStore for MemoryArtifactStore {
    async fn persist(&self, title: &Title, video: &VideoArtifact) -> Result<ArtifactReference> {
        let reference = ArtifactReference::for_title(title);
        let bytes = tokio::fs::read(&video.path).await.map_err(|e| {
            Error::Storage(format!("failed to read {}: {}", video.path.display(), e))
        })?;
        debug!("Keeping {} ({} bytes) in memory", reference.filename, bytes.len());
        self.videos
            .write()
            .await
            .insert(reference.filename.clone(), bytes);
        Ok(reference)
    }

    async fn load(&self, filename: &str) -> Result<Vec<u8>> {
        if !is_plain_filename(filename) {
            return Err(Error::NotFound(filename.to_string()));
        }
        self.videos
            .read()
            .await
            .get(filename)
            .cloned()
            .ok_or_else(|| Error::NotFound(filename.to_string()))
    }

    async fn exists(&self, filename: &str) -> Result<bool> {
        Ok(self.videos.read().await.contains_key(filename))
    }
}
