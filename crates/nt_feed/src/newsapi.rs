use async_trait::async_trait;
use nt_core::{ArticleRecord, Error, FeedGateway, Result};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::fmt;
use tracing::{debug, info};
use url::Url;
use crate::config::FeedConfig;

#[derive(Deserialize)]
struct EverythingResponse {
    status: String,
    #[serde(default)]
    articles: Vec<ArticleRecord>,
    code: Option<String>,
    message: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    code: Option<String>,
    message: Option<String>,
}

/// Feed gateway over the NewsAPI `everything` endpoint.
pub struct NewsApiGateway {
    client: Client,
    config: FeedConfig,
    api_key: String,
}

impl fmt::Debug for NewsApiGateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewsApiGateway")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.config.base_url)
            .finish()
    }
}

impl NewsApiGateway {
    pub fn new(config: FeedConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| Error::Config("NewsAPI key is required".to_string()))?;
        Url::parse(&config.base_url)
            .map_err(|e| Error::Config(format!("Invalid feed base URL {}: {}", config.base_url, e)))?;

        Ok(Self {
            client: Client::new(),
            config,
            api_key,
        })
    }

    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    /// Full request URL for `term`, api key included.
    pub fn search_url(&self, term: Option<&str>) -> Result<Url> {
        let endpoint = format!("{}/everything", self.config.base_url.trim_end_matches('/'));
        let mut url = Url::parse(&endpoint)
            .map_err(|e| Error::Config(format!("Invalid feed URL {}: {}", endpoint, e)))?;
        url.query_pairs_mut()
            .append_pair("q", self.config.query_for(term))
            .append_pair("from", &self.config.from.format("%Y-%m-%d").to_string())
            .append_pair("sortBy", &self.config.sort_by)
            .append_pair("apiKey", &self.api_key);
        Ok(url)
    }
}

/// Turn a raw response into articles.
///
/// HTTP failures and `"status": "error"` bodies are network errors; a body
/// that is not the expected JSON is a decode error.
pub fn parse_response(status: StatusCode, body: &str) -> Result<Vec<ArticleRecord>> {
    if !status.is_success() {
        let detail = serde_json::from_str::<ErrorResponse>(body)
            .ok()
            .map(|e| describe(e.code, e.message))
            .unwrap_or_else(|| "no details".to_string());
        return Err(Error::Network(format!("HTTP {}: {}", status, detail)));
    }

    let response: EverythingResponse = serde_json::from_str(body)
        .map_err(|e| Error::Decode(format!("Unexpected feed response: {}", e)))?;

    if response.status != "ok" {
        return Err(Error::Network(format!(
            "Feed returned {}: {}",
            response.status,
            describe(response.code, response.message)
        )));
    }

    Ok(response.articles)
}

fn describe(code: Option<String>, message: Option<String>) -> String {
    match (code, message) {
        (Some(code), Some(message)) => format!("{} ({})", message, code),
        (None, Some(message)) => message,
        (Some(code), None) => code,
        (None, None) => "no details".to_string(),
    }
}

#[async_trait]
impl FeedGateway for NewsApiGateway {
    fn name(&self) -> &str {
        "NewsAPI"
    }

    async fn search(&self, term: Option<&str>) -> Result<Vec<ArticleRecord>> {
        let url = self.search_url(term)?;
        debug!("🔎 Querying {} for {:?}", self.name(), self.config.query_for(term));

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Network(format!("Request failed: {}", e)))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Network(format!("Failed to read response: {}", e)))?;

        let articles = parse_response(status, &body)?;
        info!("📰 {} returned {} articles", self.name(), articles.len());
        Ok(articles)
    }
}
