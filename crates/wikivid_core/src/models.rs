use std::path::Path;

use async_trait::async_trait;

use crate::reference::Title;
use crate::types::{ArticleText, AudioTrack, Summary, VideoArtifact};
use crate::Result;

#[async_trait]
pub trait ArticleSource: Send + Sync {
    fn name(&self) -> &str;

    /// Look up an article by title. Fails with `Error::NotFound` when the
    /// repository has no such article.
    async fn fetch(&self, title: &Title) -> Result<ArticleText>;
}

#[async_trait]
pub trait Summarizer: Send + Sync {
    fn name(&self) -> &str;

    /// Produce a bounded-length abstractive summary of the article text.
    async fn summarize(&self, text: &ArticleText) -> Result<Summary>;
}

#[async_trait]
pub trait Narrator: Send + Sync {
    fn name(&self) -> &str;

    /// Synthesize speech for the summary. Audio must be written inside `scratch`.
    async fn narrate(&self, summary: &Summary, scratch: &Path) -> Result<AudioTrack>;
}

#[async_trait]
pub trait VideoComposer: Send + Sync {
    fn name(&self) -> &str;

    /// Render the summary as a caption over the narration. The encode must be
    /// written inside `scratch`.
    async fn compose(
        &self,
        summary: &Summary,
        audio: &AudioTrack,
        scratch: &Path,
    ) -> Result<VideoArtifact>;
}
