pub mod error;
pub mod models;
pub mod pipeline;
pub mod reference;
pub mod scratch;
pub mod storage;
pub mod types;

pub use error::{Error, ErrorKind, Result};
pub use models::{ArticleSource, Narrator, Summarizer, VideoComposer};
pub use pipeline::{Pipeline, PipelineError, PipelineRun, PipelineState, Stage};
pub use reference::{ArticleReference, Title};
pub use scratch::ScratchSpace;
pub use storage::{is_plain_filename, ArtifactStore};
pub use types::{ArticleText, ArtifactReference, AudioTrack, Summary, VideoArtifact, VIDEOS_ROUTE};
