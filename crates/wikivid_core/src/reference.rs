use std::fmt;

use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{Error, Result};

/// Human-readable article title, never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Title(String);

impl Title {
    pub fn new(title: impl Into<String>) -> Result<Self> {
        let title = title.into();
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return Err(Error::InvalidReference("article title is empty".to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Filename under which the rendered video for this title is stored.
    ///
    /// Spaces become underscores. Path separators and control characters are
    /// replaced with `-` so the result is always a single path component.
    pub fn artifact_filename(&self) -> String {
        let stem: String = self
            .0
            .chars()
            .map(|c| match c {
                ' ' => '_',
                '/' | '\\' => '-',
                c if c.is_control() => '-',
                c => c,
            })
            .collect();
        // A leading dot would make the artifact a hidden file.
        let stem = stem.trim_start_matches('.');
        format!("{}_video.mp4", stem)
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Title {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Title> for String {
    fn from(title: Title) -> Self {
        title.0
    }
}

/// A validated article locator together with the title it decodes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleReference {
    url: Url,
    title: Title,
}

impl ArticleReference {
    /// Parses an article URL such as `https://en.wikipedia.org/wiki/Software_testing`.
    ///
    /// The last non-empty path segment is percent-decoded and its underscores
    /// are turned into spaces to obtain the title.
    pub fn parse(raw: &str) -> Result<Self> {
        let url = Url::parse(raw.trim())
            .map_err(|e| Error::InvalidReference(format!("{}: {}", raw, e)))?;

        if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
            return Err(Error::InvalidReference(format!(
                "{}: expected an http(s) URL",
                raw
            )));
        }

        let segment = url
            .path_segments()
            .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
            .ok_or_else(|| Error::InvalidReference(format!("{}: URL has no article path", raw)))?;

        let decoded = percent_decode_str(segment)
            .decode_utf8()
            .map_err(|e| Error::InvalidReference(format!("{}: {}", raw, e)))?;

        let title = Title::new(decoded.replace('_', " "))?;
        Ok(Self { url, title })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn title(&self) -> &Title {
        &self.title
    }

    pub fn into_title(self) -> Title {
        self.title
    }
}
