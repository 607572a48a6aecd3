use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::{Deserialize, Serialize};

use crate::reference::Title;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleText {
    /// Title as resolved by the content repository (after redirects).
    pub title: String,
    pub content: String,
}

impl ArticleText {
    pub fn word_count(&self) -> usize {
        self.content.split_whitespace().count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary(String);

impl Summary {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Narration audio written into a request's scratch space.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioTrack {
    pub path: PathBuf,
    pub duration: Duration,
}

/// An encoded video. `duration` is the duration the clip was bound to,
/// which is always the narration's duration.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoArtifact {
    pub path: PathBuf,
    pub duration: Duration,
}

/// Where a stored video can be fetched from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactReference {
    pub filename: String,
    pub url: String,
}

pub const VIDEOS_ROUTE: &str = "/videos";

/// Bytes that cannot appear literally in a URL path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

impl ArtifactReference {
    /// `url` carries the filename percent-encoded; `filename` stays raw.
    pub fn for_filename(filename: impl Into<String>) -> Self {
        let filename = filename.into();
        let url = format!(
            "{}/{}",
            VIDEOS_ROUTE,
            utf8_percent_encode(&filename, PATH_SEGMENT)
        );
        Self { filename, url }
    }

    pub fn for_title(title: &Title) -> Self {
        Self::for_filename(title.artifact_filename())
    }
}

impl fmt::Display for ArtifactReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(title: &str) -> ArtifactReference {
        ArtifactReference::for_title(&Title::new(title).unwrap())
    }

    #[test]
    fn test_plain_title_url_is_unchanged() {
        let r = reference("Software testing");
        assert_eq!(r.filename, "Software_testing_video.mp4");
        assert_eq!(r.url, "/videos/Software_testing_video.mp4");
    }

    #[test]
    fn test_url_escapes_query_and_fragment_characters() {
        let r = reference("Why?");
        assert_eq!(r.filename, "Why?_video.mp4");
        assert_eq!(r.url, "/videos/Why%3F_video.mp4");

        let r = reference("100% (album)");
        assert_eq!(r.filename, "100%_(album)_video.mp4");
        assert_eq!(r.url, "/videos/100%25_(album)_video.mp4");

        assert_eq!(reference("C#").url, "/videos/C%23_video.mp4");
        assert_eq!(reference("Zürich").url, "/videos/Z%C3%BCrich_video.mp4");
    }
}
