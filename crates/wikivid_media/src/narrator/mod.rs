use std::sync::Arc;

use wikivid_core::{Error, Narrator, Result};

use crate::tools::ToolPaths;
use crate::MediaConfig;

pub mod espeak;
pub mod google;

pub use espeak::EspeakNarrator;
pub use google::GoogleTtsNarrator;

pub fn create_narrator(config: &MediaConfig, tools: &ToolPaths) -> Result<Arc<dyn Narrator>> {
    match config.narrator.as_str() {
        "google" => Ok(Arc::new(GoogleTtsNarrator::new(config, tools)?)),
        "espeak" => Ok(Arc::new(EspeakNarrator::new(config, tools)?)),
        other => Err(Error::Synthesis(format!(
            "Unknown narrator: {}. Available narrators: google, espeak",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn tools() -> ToolPaths {
        ToolPaths {
            ffmpeg: Some(PathBuf::from("ffmpeg")),
            ffprobe: Some(PathBuf::from("ffprobe")),
            espeak: Some(PathBuf::from("espeak-ng")),
        }
    }

    #[test]
    fn test_create_narrator_by_name() {
        let config = MediaConfig::default();
        assert_eq!(create_narrator(&config, &tools()).unwrap().name(), "Google TTS");

        let config = MediaConfig {
            narrator: "espeak".to_string(),
            ..MediaConfig::default()
        };
        assert_eq!(create_narrator(&config, &tools()).unwrap().name(), "espeak-ng");

        let config = MediaConfig {
            narrator: "parrot".to_string(),
            ..MediaConfig::default()
        };
        assert!(create_narrator(&config, &tools()).is_err());
    }

    #[test]
    fn test_narrators_need_ffprobe() {
        let tools = ToolPaths {
            ffprobe: None,
            ..tools()
        };
        assert!(create_narrator(&MediaConfig::default(), &tools).is_err());
    }
}
