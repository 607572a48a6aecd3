use async_trait::async_trait;
use wikivid_core::{ArticleText, Result, Summarizer, Summary};

use super::{clean_model_output, truncate_words};
use crate::InferenceConfig;

/// Offline stand-in for the abstractive model: keeps the leading sentences of
/// the article up to the configured maximum length.
#[derive(Debug)]
pub struct LeadSummarizer {
    config: InferenceConfig,
}

impl LeadSummarizer {
    pub fn new(config: InferenceConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Summarizer for LeadSummarizer {
    fn name(&self) -> &str {
        "Lead"
    }

    async fn summarize(&self, text: &ArticleText) -> Result<Summary> {
        let (input, _) = truncate_words(&clean_model_output(&text.content), self.config.input_window);
        let budget = self.config.generation.max_length as usize;

        let mut summary: Vec<&str> = Vec::new();
        for sentence in input.split_inclusive(['.', '!', '?']) {
            let words: Vec<&str> = sentence.split_whitespace().collect();
            if words.is_empty() {
                continue;
            }
            if summary.len() + words.len() > budget {
                if summary.is_empty() {
                    summary.extend(words.into_iter().take(budget));
                }
                break;
            }
            summary.extend(words);
        }

        tracing::debug!("Lead summary has {} words", summary.len());
        Ok(Summary::new(summary.join(" ")))
    }
}
