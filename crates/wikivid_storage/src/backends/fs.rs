//! Videos stored as plain files in one directory.
//!
//! A new artifact is first copied to a hidden, uniquely named partial file in
//! the store directory and then renamed onto its final name, so readers see
//! either the previous video or the complete new one.

use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, info};
use uuid::Uuid;
use wikivid_core::{
    is_plain_filename, ArtifactReference, ArtifactStore, Error, Result, Title, VideoArtifact,
};

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

    fn resolve(&self, filename: &str) -> Result<PathBuf> {
        if !is_plain_filename(filename) {
            return Err(Error::NotFound(filename.to_string()));
        }
        Ok(self.root.join(filename))
    }
}

#[async_trait]
impl ArtifactStore for FsArtifactStore {
    async fn persist(&self, title: &Title, video: &VideoArtifact) -> Result<ArtifactReference> {
        let reference = ArtifactReference::for_title(title);
        let target = self.resolve(&reference.filename).map_err(|_| {
            Error::Storage(format!("cannot store '{}' as a file", reference.filename))
        })?;

        tokio::fs::create_dir_all(&self.root).await.map_err(|e| {
            Error::Storage(format!("failed to create {}: {}", self.root.display(), e))
        })?;

        // Fixed length, so titles near the file name limit still fit.
        let partial = self.root.join(format!(".{}.partial", Uuid::new_v4()));
        if let Err(e) = tokio::fs::copy(&video.path, &partial).await {
            let _ = tokio::fs::remove_file(&partial).await;
            return Err(Error::Storage(format!(
                "failed to copy {}: {}",
                video.path.display(),
                e
            )));
        }
        if let Err(e) = tokio::fs::rename(&partial, &target).await {
            let _ = tokio::fs::remove_file(&partial).await;
            return Err(Error::Storage(format!(
                "failed to move video into place at {}: {}",
                target.display(),
                e
            )));
        }

        info!("💾 Stored {}", target.display());
        Ok(reference)
    }

    async fn load(&self, filename: &str) -> Result<Vec<u8>> {
        let path = self.resolve(filename)?;
        debug!("Reading {}", path.display());
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == IoErrorKind::NotFound => {
                Err(Error::NotFound(filename.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn exists(&self, filename: &str) -> Result<bool> {
        let Ok(path) = self.resolve(filename) else {
            return Ok(false);
        };
        match tokio::fs::metadata(&path).await {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == IoErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn video(dir: &Path, bytes: &[u8]) -> VideoArtifact {
        let path = dir.join("video.mp4");
        std::fs::write(&path, bytes).unwrap();
        VideoArtifact {
            path,
            duration: Duration::from_secs(5),
        }
    }

    #[tokio::test]
    async fn test_persist_then_load() {
        let scratch = tempfile::tempdir().unwrap();
        let videos = tempfile::tempdir().unwrap();
        let store = FsArtifactStore::new(videos.path().join("videos"));
        let title = Title::new("Software testing").unwrap();

        let reference = store
            .persist(&title, &video(scratch.path(), b"mp4 bytes"))
            .await
            .unwrap();

        assert_eq!(reference.filename, "Software_testing_video.mp4");
        assert_eq!(reference.url, "/videos/Software_testing_video.mp4");
        assert!(store.exists(&reference.filename).await.unwrap());
        assert_eq!(store.load(&reference.filename).await.unwrap(), b"mp4 bytes");
        // scratch input stays in place for the pipeline to clean up
        assert!(scratch.path().join("video.mp4").exists());
    }

    #[tokio::test]
    async fn test_persist_replaces_previous_video() {
        let scratch = tempfile::tempdir().unwrap();
        let videos = tempfile::tempdir().unwrap();
        let store = FsArtifactStore::new(videos.path());
        let title = Title::new("Software testing").unwrap();

        store.persist(&title, &video(scratch.path(), b"first")).await.unwrap();
        let reference = store
            .persist(&title, &video(scratch.path(), b"second"))
            .await
            .unwrap();

        assert_eq!(store.load(&reference.filename).await.unwrap(), b"second");
        let entries: Vec<_> = std::fs::read_dir(videos.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(entries, vec!["Software_testing_video.mp4".to_string()]);
    }

    #[tokio::test]
    async fn test_persist_long_title() {
        let scratch = tempfile::tempdir().unwrap();
        let videos = tempfile::tempdir().unwrap();
        let store = FsArtifactStore::new(videos.path());
        let title = Title::new("A".repeat(220)).unwrap();

        let reference = store
            .persist(&title, &video(scratch.path(), b"long"))
            .await
            .unwrap();

        assert_eq!(reference.filename.len(), 230);
        assert_eq!(store.load(&reference.filename).await.unwrap(), b"long");
        assert_eq!(std::fs::read_dir(videos.path()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn test_load_missing_is_not_found() {
        let videos = tempfile::tempdir().unwrap();
        let store = FsArtifactStore::new(videos.path());

        let err = store.load("Nope_video.mp4").await.unwrap_err();
        assert!(err.is_not_found());
        assert!(!store.exists("Nope_video.mp4").await.unwrap());
    }

    #[tokio::test]
    async fn test_load_rejects_paths_outside_store() {
        let outer = tempfile::tempdir().unwrap();
        std::fs::write(outer.path().join("secret.txt"), b"secret").unwrap();
        let store = FsArtifactStore::new(outer.path().join("videos"));

        let err = store.load("../secret.txt").await.unwrap_err();
        assert!(err.is_not_found());
        assert!(!store.exists("../secret.txt").await.unwrap());
    }

    #[tokio::test]
    async fn test_missing_source_leaves_no_partial_file() {
        let videos = tempfile::tempdir().unwrap();
        let store = FsArtifactStore::new(videos.path());
        let title = Title::new("Software testing").unwrap();
        let missing = VideoArtifact {
            path: videos.path().join("does-not-exist.mp4"),
            duration: Duration::from_secs(1),
        };

        let err = store.persist(&title, &missing).await.unwrap_err();
        assert!(matches!(err, Error::Storage(_)));
        assert_eq!(std::fs::read_dir(videos.path()).unwrap().count(), 0);
    }
}
