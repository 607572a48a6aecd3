use std::path::Path;
use std::time::Duration;

use wikivid_core::{Error, Result};

use crate::command::ToolCommand;

/// Measure a media file's duration with ffprobe.
pub async fn probe_duration(ffprobe: &Path, media: &Path, timeout: Duration) -> Result<Duration> {
    let output = ToolCommand::new(ffprobe.to_path_buf())
        .args([
            "-v",
            "error",
            "-show_entries",
            "format=duration",
            "-of",
            "default=noprint_wrappers=1:nokey=1",
        ])
        .arg(media.to_string_lossy())
        .timeout(timeout)
        .execute()
        .await?;

    parse_duration(&output.stdout)
}

pub(crate) fn parse_duration(stdout: &str) -> Result<Duration> {
    let raw = stdout.trim();
    let seconds: f64 = raw.parse().map_err(|_| Error::Tool {
        tool: "ffprobe".to_string(),
        message: format!("unparseable duration: {:?}", raw),
    })?;
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(Error::Tool {
            tool: "ffprobe".to_string(),
            message: format!("invalid duration: {}", seconds),
        });
    }
    Ok(Duration::from_secs_f64(seconds))
}
