use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use wikivid_core::{AudioTrack, Error, Narrator, Result, Summary};

use crate::command::ToolCommand;
use crate::probe::probe_duration;
use crate::tools::ToolPaths;
use crate::MediaConfig;

/// Offline narration with a local `espeak-ng`.
#[derive(Debug)]
pub struct EspeakNarrator {
    espeak: PathBuf,
    ffprobe: PathBuf,
    voice: String,
    tool_timeout: Duration,
}

impl EspeakNarrator {
    pub fn new(config: &MediaConfig, tools: &ToolPaths) -> Result<Self> {
        Ok(Self {
            espeak: tools.espeak()?.to_path_buf(),
            ffprobe: tools.ffprobe()?.to_path_buf(),
            voice: config.language.clone(),
            tool_timeout: config.tool_timeout,
        })
    }

    fn command(&self, text_file: &Path, wav: &Path) -> ToolCommand {
        let mut cmd = ToolCommand::new(self.espeak.clone());
        cmd.arg("-v")
            .arg(self.voice.as_str())
            .arg("-w")
            .arg(wav.to_string_lossy())
            .arg("-f")
            .arg(text_file.to_string_lossy())
            .timeout(self.tool_timeout);
        cmd
    }
}

#[async_trait]
impl Narrator for EspeakNarrator {
    fn name(&self) -> &str {
        "espeak-ng"
    }

    async fn narrate(&self, summary: &Summary, scratch: &Path) -> Result<AudioTrack> {
        let text_file = scratch.join("narration.txt");
        let path = scratch.join("speech.wav");
        tokio::fs::write(&text_file, summary.as_str()).await?;

        self.command(&text_file, &path)
            .execute()
            .await
            .map_err(|e| Error::Synthesis(e.to_string()))?;

        let duration = probe_duration(&self.ffprobe, &path, self.tool_timeout)
            .await
            .map_err(|e| Error::Synthesis(format!("could not measure narration: {}", e)))?;
        Ok(AudioTrack { path, duration })
    }
}
