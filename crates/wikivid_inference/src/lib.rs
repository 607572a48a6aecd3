use std::time::Duration;

use serde::Serialize;

pub mod models;

pub use models::create_summarizer;

/// Generation parameters handed to the summarization model. These are fixed
/// per deployment, never per request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GenerationParams {
    pub num_beams: u32,
    pub max_length: u32,
    pub early_stopping: bool,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            num_beams: 4,
            max_length: 300,
            early_stopping: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct InferenceConfig {
    /// `huggingface` (default) or `lead`.
    pub model_name: Option<String>,
    /// Inference endpoint; defaults to the hosted `facebook/bart-large-cnn`.
    pub model_url: Option<String>,
    pub api_key: Option<String>,
    /// Longest input, in words, passed to the model. Longer text is cut.
    pub input_window: usize,
    pub generation: GenerationParams,
    pub timeout: Duration,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            model_name: None,
            model_url: None,
            api_key: None,
            input_window: 1024,
            generation: GenerationParams::default(),
            timeout: Duration::from_secs(300),
        }
    }
}

pub mod prelude {
    pub use super::models::create_summarizer;
    pub use super::{GenerationParams, InferenceConfig};
    pub use wikivid_core::{ArticleText, Error, Result, Summarizer, Summary};
}
