//! Linear article-to-video pipeline.
//!
//! A run moves strictly forward through
//! `Received → Fetched → Summarized → Narrated → Composed → Stored → Done`.
//! The first failing stage moves the run to `Failed` and nothing downstream is
//! attempted.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::error::ErrorKind;
use crate::models::{ArticleSource, Narrator, Summarizer, VideoComposer};
use crate::reference::ArticleReference;
use crate::scratch::ScratchSpace;
use crate::storage::ArtifactStore;
use crate::types::ArtifactReference;
use crate::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Fetch,
    Summarize,
    Narrate,
    Compose,
    Store,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Fetch => "fetch",
            Stage::Summarize => "summarize",
            Stage::Narrate => "narrate",
            Stage::Compose => "compose",
            Stage::Store => "store",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PipelineState {
    Received,
    Fetched,
    Summarized,
    Narrated,
    Composed,
    Stored,
    Done(ArtifactReference),
    Failed { stage: Stage, reason: String },
}

impl PipelineState {
    fn position(&self) -> u8 {
        match self {
            PipelineState::Received => 0,
            PipelineState::Fetched => 1,
            PipelineState::Summarized => 2,
            PipelineState::Narrated => 3,
            PipelineState::Composed => 4,
            PipelineState::Stored => 5,
            PipelineState::Done(_) => 6,
            PipelineState::Failed { .. } => 7,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineState::Done(_) | PipelineState::Failed { .. })
    }
}

#[derive(Debug, thiserror::Error)]
#[error("{stage} stage failed: {source}")]
pub struct PipelineError {
    pub stage: Stage,
    #[source]
    pub source: Error,
}

impl PipelineError {
    pub fn kind(&self) -> ErrorKind {
        self.source.kind()
    }
}

/// Bookkeeping for one pipeline execution.
#[derive(Debug)]
pub struct PipelineRun {
    id: Uuid,
    history: Vec<PipelineState>,
}

impl PipelineRun {
    fn new(id: Uuid) -> Self {
        Self {
            id,
            history: vec![PipelineState::Received],
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> &PipelineState {
        // history always starts with Received
        &self.history[self.history.len() - 1]
    }

    pub fn history(&self) -> &[PipelineState] {
        &self.history
    }

    fn advance(&mut self, next: PipelineState) {
        let current = self.state();
        debug_assert!(!current.is_terminal(), "transition out of terminal state {:?}", current);
        debug_assert!(
            next.position() > current.position(),
            "backward transition {:?} -> {:?}",
            current,
            next
        );
        debug!("{:?} -> {:?}", current, next);
        self.history.push(next);
    }

    fn fail(&mut self, stage: Stage, source: Error) -> PipelineError {
        warn!("❌ {} stage failed: {}", stage, source);
        self.advance(PipelineState::Failed {
            stage,
            reason: source.to_string(),
        });
        PipelineError { stage, source }
    }
}

pub struct Pipeline {
    source: Arc<dyn ArticleSource>,
    summarizer: Arc<dyn Summarizer>,
    narrator: Arc<dyn Narrator>,
    composer: Arc<dyn VideoComposer>,
    store: Arc<dyn ArtifactStore>,
    scratch_root: Option<PathBuf>,
}

impl Pipeline {
    pub fn new(
        source: Arc<dyn ArticleSource>,
        summarizer: Arc<dyn Summarizer>,
        narrator: Arc<dyn Narrator>,
        composer: Arc<dyn VideoComposer>,
        store: Arc<dyn ArtifactStore>,
    ) -> Self {
        Self {
            source,
            summarizer,
            narrator,
            composer,
            store,
            scratch_root: None,
        }
    }

    /// Place per-request scratch directories under `root` instead of the
    /// system temp dir.
    pub fn with_scratch_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.scratch_root = Some(root.into());
        self
    }

    pub fn store(&self) -> &Arc<dyn ArtifactStore> {
        &self.store
    }

    /// Turn an article URL into a stored video.
    pub async fn run(&self, reference: &str) -> Result<ArtifactReference, PipelineError> {
        let mut run = PipelineRun::new(Uuid::new_v4());
        self.drive(&mut run, reference).await
    }

    /// Like [`Pipeline::run`], also returning the states the run went through.
    pub async fn run_with_history(
        &self,
        reference: &str,
    ) -> (Result<ArtifactReference, PipelineError>, PipelineRun) {
        let mut run = PipelineRun::new(Uuid::new_v4());
        let result = self.drive(&mut run, reference).await;
        (result, run)
    }

    async fn drive(
        &self,
        run: &mut PipelineRun,
        reference: &str,
    ) -> Result<ArtifactReference, PipelineError> {
        let span = info_span!("pipeline", request_id = %run.id(), title = tracing::field::Empty);

        async move {
            let title = ArticleReference::parse(reference)
                .map_err(|e| run.fail(Stage::Fetch, e))?
                .into_title();
            tracing::Span::current().record("title", title.as_str());

            info!("📰 Fetching article: {}", title);
            let article = self
                .source
                .fetch(&title)
                .await
                .and_then(|article| {
                    if article.content.trim().is_empty() {
                        Err(Error::NotFound(format!("article '{}' has no text", title)))
                    } else {
                        Ok(article)
                    }
                })
                .map_err(|e| run.fail(Stage::Fetch, e))?;
            info!("✨ Fetched {} words from {}", article.word_count(), self.source.name());
            run.advance(PipelineState::Fetched);

            info!("🤖 Summarizing with {}", self.summarizer.name());
            let summary = self
                .summarizer
                .summarize(&article)
                .await
                .and_then(|summary| {
                    if summary.is_empty() {
                        Err(Error::Inference("model produced an empty summary".to_string()))
                    } else {
                        Ok(summary)
                    }
                })
                .map_err(|e| run.fail(Stage::Summarize, e))?;
            debug!("Summary: {}", summary);
            run.advance(PipelineState::Summarized);

            let scratch = ScratchSpace::with_id(run.id(), self.scratch_root.as_deref())
                .map_err(|e| run.fail(Stage::Narrate, e))?;

            info!("🗣️ Narrating with {}", self.narrator.name());
            let audio = self
                .narrator
                .narrate(&summary, scratch.path())
                .await
                .and_then(|audio| {
                    if audio.duration.is_zero() {
                        Err(Error::Synthesis("narration has zero duration".to_string()))
                    } else {
                        Ok(audio)
                    }
                })
                .map_err(|e| run.fail(Stage::Narrate, e))?;
            info!("✨ Narration is {:.2}s long", audio.duration.as_secs_f64());
            run.advance(PipelineState::Narrated);

            info!("🎬 Composing video with {}", self.composer.name());
            let video = self
                .composer
                .compose(&summary, &audio, scratch.path())
                .await
                .and_then(|video| {
                    if video.duration != audio.duration {
                        Err(Error::Composition(format!(
                            "video duration {:?} does not match narration duration {:?}",
                            video.duration, audio.duration
                        )))
                    } else {
                        Ok(video)
                    }
                })
                .map_err(|e| run.fail(Stage::Compose, e))?;
            run.advance(PipelineState::Composed);

            info!("💾 Storing video for {}", title);
            let artifact = self
                .store
                .persist(&title, &video)
                .await
                .map_err(|e| run.fail(Stage::Store, e))?;
            run.advance(PipelineState::Stored);

            drop(scratch);
            info!("✅ Video ready at {}", artifact);
            run.advance(PipelineState::Done(artifact.clone()));
            Ok::<_, PipelineError>(artifact)
        }
        .instrument(span)
        .await
    }
}
