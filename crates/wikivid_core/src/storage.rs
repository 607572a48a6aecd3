use async_trait::async_trait;

use crate::reference::Title;
use crate::types::{ArtifactReference, VideoArtifact};
use crate::Result;

#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Store the video under the filename derived from `title`, replacing any
    /// previous artifact for the same title.
    async fn persist(&self, title: &Title, video: &VideoArtifact) -> Result<ArtifactReference>;

    /// Read a stored video. Fails with `Error::NotFound` when absent.
    async fn load(&self, filename: &str) -> Result<Vec<u8>>;

    async fn exists(&self, filename: &str) -> Result<bool>;
}

/// True when `name` can be used as a single file name inside the store.
pub fn is_plain_filename(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && !name.contains(['/', '\\', '\0'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_filenames() {
        assert!(is_plain_filename("Software_testing_video.mp4"));
        assert!(is_plain_filename("Zürich_video.mp4"));
        assert!(!is_plain_filename(""));
        assert!(!is_plain_filename(".."));
        assert!(!is_plain_filename(".hidden.partial"));
        assert!(!is_plain_filename("../etc/passwd"));
        assert!(!is_plain_filename("a\\b.mp4"));
    }
}
