//! Caption video rendering with ffmpeg.
//!
//! The frame is a solid background colour with the summary drawn on top for
//! the whole clip. The clip is cut to exactly the narration's duration and the
//! narration is muxed in as the soundtrack.
//!
//! The duration reported for the encoded clip is the value passed to `-t`,
//! not a measurement of the output file. Captions longer than the frame can
//! hold are cut after the last line that fits and end with `...`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;
use wikivid_core::{AudioTrack, Error, Result, Summary, VideoArtifact, VideoComposer};

use crate::command::ToolCommand;
use crate::tools::ToolPaths;
use crate::{CaptionStyle, MediaConfig};

const CAPTION_FILE: &str = "caption.txt";
const OUTPUT_FILE: &str = "video.mp4";

/// Average glyph width relative to the font size, for wrapping.
const GLYPH_WIDTH_RATIO: f32 = 0.6;
const MARGIN_PX: u32 = 20;
const LINE_SPACING_PX: u32 = 6;
const ELLIPSIS: &str = "...";

#[derive(Debug)]
pub struct FfmpegComposer {
    ffmpeg: PathBuf,
    style: CaptionStyle,
    tool_timeout: Duration,
}

impl FfmpegComposer {
    pub fn new(config: &MediaConfig, tools: &ToolPaths) -> Result<Self> {
        Ok(Self {
            ffmpeg: tools.ffmpeg()?.to_path_buf(),
            style: config.caption.clone(),
            tool_timeout: config.tool_timeout,
        })
    }

    /// ffmpeg arguments, relative to the scratch directory.
    pub(crate) fn build_args(&self, audio_file: &str, duration: Duration) -> Vec<String> {
        let style = &self.style;
        let source = format!(
            "color=c={}:s={}x{}:r={}",
            style.background, style.width, style.height, style.fps
        );

        let mut drawtext = format!(
            "drawtext=textfile={}:expansion=none:fontcolor={}:fontsize={}:line_spacing={}:x=(w-text_w)/2:y=(h-text_h)/2",
            CAPTION_FILE, style.foreground, style.font_size, LINE_SPACING_PX
        );
        if let Some(font) = &style.font {
            drawtext.push_str(":font=");
            drawtext.push_str(&escape_filter_value(font));
        }

        let fps = style.fps.to_string();
        let seconds = format_seconds(duration);
        [
            "-y", "-hide_banner", "-loglevel", "error",
            "-f", "lavfi", "-i", source.as_str(),
            "-i", audio_file,
            "-vf", drawtext.as_str(),
            "-map", "0:v:0", "-map", "1:a:0",
            "-c:v", "libx264", "-pix_fmt", "yuv420p",
            "-r", fps.as_str(),
            "-c:a", "aac",
            "-t", seconds.as_str(),
            "-movflags", "+faststart",
            OUTPUT_FILE,
        ]
        .into_iter()
        .map(str::to_string)
        .collect()
    }
}

#[async_trait]
impl VideoComposer for FfmpegComposer {
    fn name(&self) -> &str {
        "ffmpeg"
    }

    async fn compose(
        &self,
        summary: &Summary,
        audio: &AudioTrack,
        scratch: &Path,
    ) -> Result<VideoArtifact> {
        let caption = wrap_caption(summary.as_str(), &self.style);
        tokio::fs::write(scratch.join(CAPTION_FILE), &caption).await?;

        let audio_file = audio
            .path
            .strip_prefix(scratch)
            .unwrap_or(&audio.path)
            .to_string_lossy()
            .to_string();

        let args = self.build_args(&audio_file, audio.duration);
        debug!("ffmpeg {}", args.join(" "));
        ToolCommand::new(self.ffmpeg.clone())
            .args(args)
            .current_dir(scratch)
            .timeout(self.tool_timeout)
            .execute()
            .await
            .map_err(|e| Error::Composition(e.to_string()))?;

        let path = scratch.join(OUTPUT_FILE);
        let written = tokio::fs::metadata(&path)
            .await
            .map(|m| m.len())
            .unwrap_or(0);
        if written == 0 {
            return Err(Error::Composition("ffmpeg produced no output".to_string()));
        }

        // ffmpeg was told `-t audio.duration`
        Ok(VideoArtifact {
            path,
            duration: audio.duration,
        })
    }
}

/// Greedy word wrap sized to the frame at the configured font size.
pub(crate) fn wrap_caption(text: &str, style: &CaptionStyle) -> String {
    let usable = style.width.saturating_sub(2 * MARGIN_PX) as f32;
    let glyph = (style.font_size as f32 * GLYPH_WIDTH_RATIO).max(1.0);
    let max_chars = ((usable / glyph) as usize).max(1);
    let max_lines = (style.height.saturating_sub(2 * MARGIN_PX)
        / (style.font_size + LINE_SPACING_PX).max(1))
    .max(1) as usize;

    let mut lines: Vec<String> = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        let line_len = line.chars().count();
        if line_len > 0 && line_len + 1 + word.chars().count() > max_chars {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }

    if lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            while !last.is_empty() && last.chars().count() + ELLIPSIS.len() > max_chars {
                match last.rfind(' ') {
                    Some(idx) => last.truncate(idx),
                    None => last.clear(),
                }
            }
            last.push_str(ELLIPSIS);
        }
    }
    lines.join("\n")
}

/// Seconds with microsecond precision, as ffmpeg's `-t` expects.
fn format_seconds(duration: Duration) -> String {
    format!("{}.{:06}", duration.as_secs(), duration.subsec_micros())
}

/// Escape a value embedded in a `-vf` filter graph: once for the filter
/// option parser and once for the graph parser.
pub(crate) fn escape_filter_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' | '\'' | ':' => {
                escaped.push_str("\\\\");
                if c == '\\' {
                    escaped.push_str("\\\\");
                } else {
                    escaped.push(c);
                }
            }
            ',' | ';' | '[' | ']' => {
                escaped.push('\\');
                escaped.push(c);
            }
            c => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn composer() -> FfmpegComposer {
        let tools = ToolPaths {
            ffmpeg: Some(PathBuf::from("/usr/bin/ffmpeg")),
            ..ToolPaths::default()
        };
        FfmpegComposer::new(&MediaConfig::default(), &tools).unwrap()
    }

    fn value_after<'a>(args: &'a [String], flag: &str) -> &'a str {
        let idx = args.iter().position(|a| a == flag).unwrap();
        &args[idx + 1]
    }

    #[test]
    fn test_args_bind_duration_and_style() {
        let args = composer().build_args("speech.mp3", Duration::from_micros(12_345_678));

        assert_eq!(value_after(&args, "-t"), "12.345678");
        assert_eq!(value_after(&args, "-r"), "24");
        assert_eq!(value_after(&args, "-i"), "color=c=black:s=800x600:r=24");
        assert!(args.iter().any(|a| a == "speech.mp3"));

        let filter = value_after(&args, "-vf");
        assert!(filter.starts_with("drawtext=textfile=caption.txt:expansion=none"));
        assert!(filter.contains("fontcolor=white"));
        assert!(filter.contains("fontsize=24"));
        assert_eq!(args.last().unwrap(), "video.mp4");
    }

    #[test]
    fn test_args_include_escaped_font() {
        let mut composer = composer();
        composer.style.font = Some("DejaVu Sans:Bold".to_string());
        let args = composer.build_args("speech.mp3", Duration::from_secs(3));
        assert!(value_after(&args, "-vf").ends_with(":font=DejaVu Sans\\\\:Bold"));
    }

    #[test]
    fn test_wrap_caption_fits_frame() {
        let style = CaptionStyle::default();
        let text = "Software testing is the act of checking whether software satisfies expectations. "
            .repeat(6);
        let wrapped = wrap_caption(&text, &style);
        let max_chars = ((800 - 40) as f32 / (24.0 * 0.6)) as usize;

        assert!(wrapped.lines().count() > 1);
        for line in wrapped.lines() {
            assert!(line.chars().count() <= max_chars, "line too long: {line:?}");
        }
        assert_eq!(
            wrapped.split_whitespace().collect::<Vec<_>>(),
            text.split_whitespace().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_wrap_caption_is_capped_to_frame_height() {
        let style = CaptionStyle::default();
        let text = "word ".repeat(300);
        let wrapped = wrap_caption(&text, &style);
        let lines: Vec<&str> = wrapped.lines().collect();

        // (600 - 40) / (24 + 6)
        assert_eq!(lines.len(), 18);
        let max_chars = ((800 - 40) as f32 / (24.0 * 0.6)) as usize;
        assert!(lines.iter().all(|l| l.chars().count() <= max_chars));
        assert!(lines[17].ends_with("word..."));

        let short = wrap_caption("A short summary.", &style);
        assert_eq!(short, "A short summary.");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_compose_reports_bound_duration() {
        use std::os::unix::fs::PermissionsExt;

        let bin = tempfile::tempdir().unwrap();
        let ffmpeg = bin.path().join("ffmpeg");
        // stand-in encoder: writes its arguments into the output file
        std::fs::write(
            &ffmpeg,
            "#!/bin/sh\nfor last; do :; done\necho \"$@\" > \"$last\"\n",
        )
        .unwrap();
        std::fs::set_permissions(&ffmpeg, std::fs::Permissions::from_mode(0o755)).unwrap();

        let tools = ToolPaths {
            ffmpeg: Some(ffmpeg),
            ..ToolPaths::default()
        };
        let composer = FfmpegComposer::new(&MediaConfig::default(), &tools).unwrap();
        let scratch = tempfile::tempdir().unwrap();
        let audio = AudioTrack {
            path: scratch.path().join("speech.mp3"),
            duration: Duration::from_millis(2500),
        };
        std::fs::write(&audio.path, b"mp3").unwrap();

        let video = composer
            .compose(&Summary::new("Hello there."), &audio, scratch.path())
            .await
            .unwrap();

        assert_eq!(video.duration, audio.duration);
        assert_eq!(video.path, scratch.path().join("video.mp4"));
        let recorded = std::fs::read_to_string(&video.path).unwrap();
        assert!(recorded.contains("-t 2.500000"), "args: {recorded}");
        assert!(recorded.contains("-i speech.mp3"), "args: {recorded}");
        assert_eq!(
            std::fs::read_to_string(scratch.path().join("caption.txt")).unwrap(),
            "Hello there."
        );
    }

    #[test]
    fn test_escape_filter_value() {
        assert_eq!(escape_filter_value("plain"), "plain");
        assert_eq!(escape_filter_value("a:b"), "a\\\\:b");
        assert_eq!(escape_filter_value("a,b"), "a\\,b");
        assert_eq!(escape_filter_value("it's"), "it\\\\'s");
    }

    #[tokio::test]
    async fn test_failed_encode_is_composition_failure() {
        let tools = ToolPaths {
            ffmpeg: Some(PathBuf::from("/nonexistent/wikivid/ffmpeg")),
            ..ToolPaths::default()
        };
        let composer = FfmpegComposer::new(&MediaConfig::default(), &tools).unwrap();
        let scratch = tempfile::tempdir().unwrap();
        let audio = AudioTrack {
            path: scratch.path().join("speech.mp3"),
            duration: Duration::from_secs(2),
        };

        let err = composer
            .compose(&Summary::new("Hello."), &audio, scratch.path())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Composition(_)), "unexpected error: {err}");
        assert!(!scratch.path().join("video.mp4").exists());
    }
}
