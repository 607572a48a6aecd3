use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tokio::io::AsyncWriteExt;
use tracing::debug;
use wikivid_core::{AudioTrack, Error, Narrator, Result, Summary};

use crate::probe::probe_duration;
use crate::tools::ToolPaths;
use crate::MediaConfig;

const DEFAULT_TTS_URL: &str = "https://translate.google.com/translate_tts";

/// Longest text the endpoint accepts per request.
const MAX_CHUNK_CHARS: usize = 100;

/// Speech from Google Translate's TTS endpoint, one MP3 request per chunk of
/// at most 100 characters. The MP3 responses are concatenated.
#[derive(Debug)]
pub struct GoogleTtsNarrator {
    client: Client,
    endpoint: String,
    language: String,
    ffprobe: PathBuf,
    tool_timeout: Duration,
}

impl GoogleTtsNarrator {
    pub fn new(config: &MediaConfig, tools: &ToolPaths) -> Result<Self> {
        let client = Client::builder()
            .user_agent("Mozilla/5.0 (compatible; wikivid)")
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            client,
            endpoint: config
                .tts_url
                .clone()
                .unwrap_or_else(|| DEFAULT_TTS_URL.to_string()),
            language: config.language.clone(),
            ffprobe: tools.ffprobe()?.to_path_buf(),
            tool_timeout: config.tool_timeout,
        })
    }

    /// Fetch speech for `text` and write it to `dest`.
    pub async fn synthesize(&self, text: &str, dest: &Path) -> Result<()> {
        let chunks = split_into_chunks(text, MAX_CHUNK_CHARS);
        if chunks.is_empty() {
            return Err(Error::Synthesis("nothing to narrate".to_string()));
        }

        let mut file = tokio::fs::File::create(dest).await?;
        let total = chunks.len().to_string();
        for (idx, chunk) in chunks.iter().enumerate() {
            debug!("Requesting speech chunk {}/{}", idx + 1, chunks.len());
            let idx = idx.to_string();
            let textlen = chunk.chars().count().to_string();
            let response = self
                .client
                .get(&self.endpoint)
                .query(&[
                    ("ie", "UTF-8"),
                    ("client", "tw-ob"),
                    ("tl", self.language.as_str()),
                    ("q", chunk.as_str()),
                    ("total", total.as_str()),
                    ("idx", idx.as_str()),
                    ("textlen", textlen.as_str()),
                ])
                .send()
                .await
                .and_then(|r| r.error_for_status())
                .map_err(|e| Error::Synthesis(format!("speech request failed: {}", e)))?;

            let audio = response
                .bytes()
                .await
                .map_err(|e| Error::Synthesis(format!("failed to read speech audio: {}", e)))?;
            if audio.is_empty() {
                return Err(Error::Synthesis(format!("empty audio for chunk {}", idx)));
            }
            file.write_all(&audio).await?;
        }
        file.flush().await?;
        Ok(())
    }
}

#[async_trait]
impl Narrator for GoogleTtsNarrator {
    fn name(&self) -> &str {
        "Google TTS"
    }

    async fn narrate(&self, summary: &Summary, scratch: &Path) -> Result<AudioTrack> {
        let path = scratch.join("speech.mp3");
        self.synthesize(summary.as_str(), &path).await?;

        let duration = probe_duration(&self.ffprobe, &path, self.tool_timeout)
            .await
            .map_err(|e| Error::Synthesis(format!("could not measure narration: {}", e)))?;
        Ok(AudioTrack { path, duration })
    }
}

/// Split text at word boundaries into chunks of at most `max_chars`
/// characters. Words longer than `max_chars` are split mid-word.
pub(crate) fn split_into_chunks(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > max_chars {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = word.split_off(max_chars);
            chunks.push(word.into_iter().collect());
            word = rest;
        }

        let needed = if current.is_empty() { word.len() } else { word.len() + 1 };
        if current_len + needed > max_chars {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if !current.is_empty() {
            current.push(' ');
            current_len += 1;
        }
        current_len += word.len();
        current.extend(word);
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}
