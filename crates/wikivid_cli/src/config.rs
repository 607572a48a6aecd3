//! Command line and environment options, turned into the per-crate configs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use wikivid_fetch::FetchConfig;
use wikivid_inference::InferenceConfig;
use wikivid_media::{CaptionStyle, MediaConfig};
use wikivid_storage::StoreConfig;
use wikivid_web::ServerConfig;

use crate::duration::HumanDuration;

#[derive(Parser, Debug)]
#[command(author, version, about = "Turn Wikipedia articles into narrated caption videos", long_about = None)]
pub struct Cli {
    /// Emit logs as JSON lines instead of human readable text
    #[arg(long, global = true, env = "WIKIVID_LOG_JSON")]
    pub log_json: bool,

    #[command(flatten)]
    pub pipeline: PipelineArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP server
    Serve {
        #[arg(long, env = "WIKIVID_HOST", default_value = "0.0.0.0")]
        host: String,
        #[arg(long, env = "WIKIVID_PORT", default_value_t = 8000)]
        port: u16,
    },
    /// Render one article URL and print where the video was stored
    Render {
        /// e.g. https://en.wikipedia.org/wiki/Software_testing
        url: String,
    },
    /// Show which media tools were found
    Tools {
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreKind {
    Fs,
    Memory,
}

#[derive(Args, Debug)]
pub struct PipelineArgs {
    /// Directory the rendered videos are written to
    #[arg(long, global = true, env = "WIKIVID_VIDEOS_DIR", default_value = "videos")]
    pub videos_dir: PathBuf,

    #[arg(long, global = true, env = "WIKIVID_STORE", value_enum, default_value_t = StoreKind::Fs)]
    pub store: StoreKind,

    /// Parent directory for per-request scratch directories
    #[arg(long, global = true, env = "WIKIVID_SCRATCH_DIR")]
    pub scratch_dir: Option<PathBuf>,

    /// Wikipedia language edition
    #[arg(long, global = true, env = "WIKIVID_LANGUAGE", default_value = "en")]
    pub language: String,

    /// MediaWiki API endpoint, derived from --language when unset
    #[arg(long, global = true, env = "WIKIVID_WIKIPEDIA_API")]
    pub wikipedia_api: Option<String>,

    /// Summarizer to use. Available: huggingface (default), lead
    #[arg(long, global = true, env = "WIKIVID_SUMMARIZER", default_value = "huggingface")]
    pub summarizer: String,

    #[arg(long, global = true, env = "WIKIVID_MODEL_URL")]
    pub model_url: Option<String>,

    #[arg(long, global = true, env = "WIKIVID_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Narrator to use. Available: google (default), espeak
    #[arg(long, global = true, env = "WIKIVID_NARRATOR", default_value = "google")]
    pub narrator: String,

    #[arg(long, global = true, env = "WIKIVID_TTS_URL")]
    pub tts_url: Option<String>,

    /// Caption font family
    #[arg(long, global = true, env = "WIKIVID_FONT")]
    pub font: Option<String>,

    /// Limit for a single ffmpeg/ffprobe/espeak-ng run (e.g. 90s, 10m)
    #[arg(long, global = true, env = "WIKIVID_TOOL_TIMEOUT", default_value = "10m")]
    pub tool_timeout: HumanDuration,

    #[arg(long, global = true, env = "WIKIVID_FFMPEG")]
    pub ffmpeg: Option<PathBuf>,

    #[arg(long, global = true, env = "WIKIVID_FFPROBE")]
    pub ffprobe: Option<PathBuf>,

    #[arg(long, global = true, env = "WIKIVID_ESPEAK")]
    pub espeak: Option<PathBuf>,
}

impl PipelineArgs {
    pub fn fetch_config(&self) -> FetchConfig {
        FetchConfig {
            language: self.language.clone(),
            api_url: self.wikipedia_api.clone(),
            ..FetchConfig::default()
        }
    }

    pub fn inference_config(&self) -> InferenceConfig {
        InferenceConfig {
            model_name: Some(self.summarizer.clone()),
            model_url: self.model_url.clone(),
            api_key: self.api_key.clone(),
            ..InferenceConfig::default()
        }
    }

    pub fn media_config(&self) -> MediaConfig {
        MediaConfig {
            narrator: self.narrator.clone(),
            language: self.language.clone(),
            tts_url: self.tts_url.clone(),
            caption: CaptionStyle {
                font: self.font.clone(),
                ..CaptionStyle::default()
            },
            tool_timeout: self.tool_timeout.0,
            ffmpeg: self.ffmpeg.clone(),
            ffprobe: self.ffprobe.clone(),
            espeak: self.espeak.clone(),
        }
    }

    pub fn store_config(&self) -> StoreConfig {
        match self.store {
            StoreKind::Fs => StoreConfig::Filesystem {
                root: self.videos_dir.clone(),
            },
            StoreKind::Memory => StoreConfig::Memory,
        }
    }
}

pub fn server_config(host: &str, port: u16) -> ServerConfig {
    ServerConfig {
        host: host.to_string(),
        port,
    }
}
