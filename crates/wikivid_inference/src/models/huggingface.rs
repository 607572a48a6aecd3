use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};
use wikivid_core::{ArticleText, Error, Result, Summarizer, Summary};

use super::{clean_model_output, truncate_words};
use crate::{GenerationParams, InferenceConfig};

const DEFAULT_MODEL_URL: &str =
    "https://api-inference.huggingface.co/models/facebook/bart-large-cnn";

#[derive(Serialize)]
struct SummarizationRequest<'a> {
    inputs: &'a str,
    parameters: RequestParameters,
    options: RequestOptions,
}

#[derive(Serialize)]
struct RequestParameters {
    #[serde(flatten)]
    generation: GenerationParams,
    truncation: &'static str,
}

#[derive(Serialize)]
struct RequestOptions {
    wait_for_model: bool,
    use_cache: bool,
}

#[derive(Deserialize)]
struct SummarizationOutput {
    summary_text: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
}

/// Abstractive summarization through a Hugging Face style inference endpoint
/// (`facebook/bart-large-cnn` unless configured otherwise).
pub struct HuggingFaceSummarizer {
    client: Client,
    model_url: String,
    api_key: Option<String>,
    input_window: usize,
    generation: GenerationParams,
}

impl HuggingFaceSummarizer {
    pub fn new(config: InferenceConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            model_url: config
                .model_url
                .unwrap_or_else(|| DEFAULT_MODEL_URL.to_string()),
            api_key: config.api_key,
            input_window: config.input_window,
            generation: config.generation,
        })
    }
}

impl fmt::Debug for HuggingFaceSummarizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HuggingFaceSummarizer")
            .field("client", &"<reqwest::Client>")
            .field("model_url", &self.model_url)
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("generation", &self.generation)
            .finish()
    }
}

#[async_trait]
impl Summarizer for HuggingFaceSummarizer {
    fn name(&self) -> &str {
        "HuggingFace"
    }

    async fn summarize(&self, text: &ArticleText) -> Result<Summary> {
        let (input, truncated) = truncate_words(&text.content, self.input_window);
        if truncated {
            info!(
                "✂️ Article '{}' truncated to {} words for the model",
                text.title, self.input_window
            );
        }

        let request = SummarizationRequest {
            inputs: &input,
            parameters: RequestParameters {
                generation: self.generation,
                truncation: "only_first",
            },
            options: RequestOptions {
                wait_for_model: true,
                use_cache: true,
            },
        };

        let mut builder = self.client.post(&self.model_url).json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| Error::Inference(format!("request to {} failed: {}", self.model_url, e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Inference(format!("failed to read model response: {}", e)))?;

        if !status.is_success() {
            let reason = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            return Err(Error::Inference(format!("model returned {}: {}", status, reason)));
        }

        let outputs: Vec<SummarizationOutput> = serde_json::from_str(&body)
            .map_err(|e| Error::Inference(format!("unexpected model response: {}", e)))?;

        let summary = outputs
            .into_iter()
            .next()
            .map(|o| clean_model_output(&o.summary_text))
            .filter(|s| !s.is_empty())
            .ok_or_else(|| Error::Inference("model returned an empty summary".to_string()))?;

        debug!("Model summary: {}", summary);
        Ok(Summary::new(summary))
    }
}
