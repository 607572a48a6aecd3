use std::time::Duration;

pub mod wikipedia;

pub use wikipedia::WikipediaClient;

#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Language edition, e.g. `en` for en.wikipedia.org.
    pub language: String,
    /// Overrides the MediaWiki API endpoint derived from `language`.
    pub api_url: Option<String>,
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            api_url: None,
            user_agent: format!("wikivid/{} (article-to-video renderer)", env!("CARGO_PKG_VERSION")),
            timeout: Duration::from_secs(30),
        }
    }
}

impl FetchConfig {
    pub fn endpoint(&self) -> String {
        self.api_url
            .clone()
            .unwrap_or_else(|| format!("https://{}.wikipedia.org/w/api.php", self.language))
    }
}

pub mod prelude {
    pub use super::{FetchConfig, WikipediaClient};
    pub use wikivid_core::{ArticleSource, ArticleText, Error, Result, Title};
}
