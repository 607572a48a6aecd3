//! Narration and video rendering adapters.
//!
//! Speech comes from a remote TTS endpoint or a local `espeak-ng`; durations
//! are measured with `ffprobe` and videos are encoded with `ffmpeg`.

use std::path::PathBuf;
use std::time::Duration;

pub mod command;
pub mod composer;
pub mod narrator;
pub mod probe;
pub mod tools;

pub use command::{ToolCommand, ToolOutput};
pub use composer::FfmpegComposer;
pub use narrator::{create_narrator, EspeakNarrator, GoogleTtsNarrator};
pub use tools::{ToolInfo, ToolPaths};

/// Fixed look of the rendered caption clip.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionStyle {
    pub width: u32,
    pub height: u32,
    pub font_size: u32,
    pub foreground: String,
    pub background: String,
    /// Font family resolved through fontconfig; ffmpeg's default when unset.
    pub font: Option<String>,
    pub fps: u32,
}

impl Default for CaptionStyle {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            font_size: 24,
            foreground: "white".to_string(),
            background: "black".to_string(),
            font: None,
            fps: 24,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MediaConfig {
    /// `google` (default) or `espeak`.
    pub narrator: String,
    /// Spoken language passed to the synthesizer.
    pub language: String,
    /// Overrides the remote TTS endpoint.
    pub tts_url: Option<String>,
    pub caption: CaptionStyle,
    /// Upper bound for any single external tool invocation.
    pub tool_timeout: Duration,
    pub ffmpeg: Option<PathBuf>,
    pub ffprobe: Option<PathBuf>,
    pub espeak: Option<PathBuf>,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            narrator: "google".to_string(),
            language: "en".to_string(),
            tts_url: None,
            caption: CaptionStyle::default(),
            tool_timeout: Duration::from_secs(600),
            ffmpeg: None,
            ffprobe: None,
            espeak: None,
        }
    }
}

pub mod prelude {
    pub use super::{CaptionStyle, FfmpegComposer, MediaConfig, ToolPaths};
    pub use super::narrator::create_narrator;
    pub use wikivid_core::{AudioTrack, Error, Narrator, Result, Summary, VideoArtifact, VideoComposer};
}
