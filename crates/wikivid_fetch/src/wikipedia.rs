use anyhow::anyhow;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use wikivid_core::{ArticleSource, ArticleText, Error, Result, Title};

use crate::FetchConfig;

#[derive(Deserialize)]
struct QueryResponse {
    query: Option<Query>,
    error: Option<ApiError>,
}

#[derive(Deserialize)]
struct ApiError {
    code: String,
    info: String,
}

#[derive(Deserialize)]
struct Query {
    #[serde(default)]
    pages: Vec<Page>,
}

#[derive(Deserialize)]
struct Page {
    title: String,
    #[serde(default)]
    missing: bool,
    #[serde(default)]
    invalid: bool,
    extract: Option<String>,
}

/// Plain-text article lookup against the MediaWiki Action API.
pub struct WikipediaClient {
    client: Client,
    endpoint: String,
}

impl WikipediaClient {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl std::fmt::Debug for WikipediaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WikipediaClient")
            .field("client", &"<reqwest::Client>")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

#[async_trait]
impl ArticleSource for WikipediaClient {
    fn name(&self) -> &str {
        "Wikipedia"
    }

    async fn fetch(&self, title: &Title) -> Result<ArticleText> {
        debug!("Querying {} for '{}'", self.endpoint, title);
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("action", "query"),
                ("format", "json"),
                ("formatversion", "2"),
                ("prop", "extracts"),
                ("explaintext", "1"),
                ("redirects", "1"),
                ("titles", title.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json::<QueryResponse>()
            .await?;

        if let Some(error) = response.error {
            return Err(Error::External(anyhow!(
                "MediaWiki API error {}: {}",
                error.code,
                error.info
            )));
        }

        let page = response
            .query
            .and_then(|q| q.pages.into_iter().next())
            .ok_or_else(|| Error::NotFound(format!("no page returned for '{}'", title)))?;

        if page.missing || page.invalid {
            return Err(Error::NotFound(format!("article '{}' does not exist", title)));
        }

        match page.extract {
            Some(content) if !content.trim().is_empty() => Ok(ArticleText {
                title: page.title,
                content,
            }),
            _ => Err(Error::NotFound(format!("article '{}' has no text", title))),
        }
    }
}
