//! Discovery of the external tools used for narration and rendering.

use std::path::{Path, PathBuf};

use serde::Serialize;
use wikivid_core::{Error, Result};

use crate::MediaConfig;

pub const FFMPEG: &str = "ffmpeg";
pub const FFPROBE: &str = "ffprobe";
pub const ESPEAK: &str = "espeak-ng";

#[derive(Debug, Clone, Serialize)]
pub struct ToolInfo {
    pub name: String,
    pub available: bool,
    pub path: Option<PathBuf>,
}

/// Configured or discovered locations of the media tools.
#[derive(Debug, Clone, Default)]
pub struct ToolPaths {
    pub ffmpeg: Option<PathBuf>,
    pub ffprobe: Option<PathBuf>,
    pub espeak: Option<PathBuf>,
}

impl ToolPaths {
    /// Use configured paths where given, otherwise search `PATH`.
    pub fn discover(config: &MediaConfig) -> Self {
        Self {
            ffmpeg: resolve(config.ffmpeg.as_deref(), FFMPEG),
            ffprobe: resolve(config.ffprobe.as_deref(), FFPROBE),
            espeak: resolve(config.espeak.as_deref(), ESPEAK),
        }
    }

    pub fn ffmpeg(&self) -> Result<&Path> {
        require(self.ffmpeg.as_deref(), FFMPEG)
    }

    pub fn ffprobe(&self) -> Result<&Path> {
        require(self.ffprobe.as_deref(), FFPROBE)
    }

    pub fn espeak(&self) -> Result<&Path> {
        require(self.espeak.as_deref(), ESPEAK)
    }

    pub fn report(&self) -> Vec<ToolInfo> {
        [
            (FFMPEG, &self.ffmpeg),
            (FFPROBE, &self.ffprobe),
            (ESPEAK, &self.espeak),
        ]
        .into_iter()
        .map(|(name, path)| ToolInfo {
            name: name.to_string(),
            available: path.is_some(),
            path: path.clone(),
        })
        .collect()
    }
}

fn resolve(configured: Option<&Path>, name: &str) -> Option<PathBuf> {
    match configured {
        Some(path) => which::which(path).ok(),
        None => which::which(name).ok(),
    }
}

fn require<'a>(path: Option<&'a Path>, name: &str) -> Result<&'a Path> {
    path.ok_or_else(|| Error::Tool {
        tool: name.to_string(),
        message: "not found on PATH".to_string(),
    })
}
