use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid article reference: {0}")]
    InvalidReference(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Inference error: {0}")]
    Inference(String),

    #[error("Synthesis error: {0}")]
    Synthesis(String),

    #[error("Composition error: {0}")]
    Composition(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Tool error [{tool}]: {message}")]
    Tool { tool: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

/// Coarse classification used when an error crosses the HTTP boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidReference,
    NotFound,
    Internal,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidReference(_) => ErrorKind::InvalidReference,
            Error::NotFound(_) => ErrorKind::NotFound,
            _ => ErrorKind::Internal,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(Error::NotFound("x".into()).kind(), ErrorKind::NotFound);
        assert_eq!(
            Error::InvalidReference("x".into()).kind(),
            ErrorKind::InvalidReference
        );
        assert_eq!(Error::Inference("oom".into()).kind(), ErrorKind::Internal);
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        // A missing file at the IO layer is still an internal failure.
        assert_eq!(Error::from(io).kind(), ErrorKind::Internal);
    }

    #[test]
    fn test_tool_error_message() {
        let err = Error::Tool {
            tool: "ffmpeg".to_string(),
            message: "exited with status 1".to_string(),
        };
        assert_eq!(err.to_string(), "Tool error [ffmpeg]: exited with status 1");
    }
}
