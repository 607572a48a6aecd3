use std::sync::Arc;

use wikivid_core::{Error, Result, Summarizer};

use crate::InferenceConfig;

pub mod huggingface;
pub mod lead;

pub use huggingface::HuggingFaceSummarizer;
pub use lead::LeadSummarizer;

const CONTROL_TOKENS: &[&str] = &["<s>", "</s>", "<pad>", "<unk>", "<mask>"];

pub fn create_summarizer(config: &InferenceConfig) -> Result<Arc<dyn Summarizer>> {
    match config.model_name.as_deref().unwrap_or("huggingface") {
        "huggingface" | "bart" => Ok(Arc::new(HuggingFaceSummarizer::new(config.clone())?)),
        "lead" => Ok(Arc::new(LeadSummarizer::new(config.clone()))),
        other => Err(Error::Inference(format!(
            "Unknown summarization model: {}. Available models: huggingface, lead",
            other
        ))),
    }
}

/// Keep at most `max_words` whitespace-separated words of `text`.
/// Returns the kept text and whether anything was cut.
pub(crate) fn truncate_words(text: &str, max_words: usize) -> (String, bool) {
    let mut words = text.split_whitespace();
    let kept: Vec<&str> = words.by_ref().take(max_words).collect();
    let truncated = words.next().is_some();
    (kept.join(" "), truncated)
}

/// Remove model control tokens and collapse whitespace.
pub(crate) fn clean_model_output(raw: &str) -> String {
    let mut text = raw.to_string();
    for token in CONTROL_TOKENS {
        text = text.replace(token, " ");
    }
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
