use chrono::NaiveDate;
use std::fmt;

pub const DEFAULT_BASE_URL: &str = "https://newsapi.org/v2";
pub const DEFAULT_QUERY: &str = "example";
pub const DEFAULT_SORT: &str = "publishedAt";

/// Settings for the NewsAPI `everything` query.
#[derive(Clone)]
pub struct FeedConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    /// Used when the search box is empty.
    pub default_query: String,
    /// Lower bound on publication date.
    pub from: NaiveDate,
    pub sort_by: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            default_query: DEFAULT_QUERY.to_string(),
            from: NaiveDate::from_ymd_opt(2023, 5, 20).unwrap_or(NaiveDate::MIN),
            sort_by: DEFAULT_SORT.to_string(),
        }
    }
}

impl fmt::Debug for FeedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeedConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("default_query", &self.default_query)
            .field("from", &self.from)
            .field("sort_by", &self.sort_by)
            .finish()
    }
}

impl FeedConfig {
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_from(mut self, from: NaiveDate) -> Self {
        self.from = from;
        self
    }

    /// The term actually sent: blank input falls back to the default query.
    pub fn query_for<'a>(&'a self, term: Option<&'a str>) -> &'a str {
        match term.map(str::trim) {
            Some(term) if !term.is_empty() => term,
            _ => &self.default_query,
        }
    }
}
