use async_trait::async_trait;
use crate::types::ArticleRecord;
use crate::Result;

#[async_trait]
pub trait FeedGateway: Send + Sync {
    /// Returns the name of the news provider
    fn name(&self) -> &str;

    /// Search articles matching `term`. An empty or blank term falls back to
    /// the gateway's default query.
    async fn search(&self, term: Option<&str>) -> Result<Vec<ArticleRecord>>;
}
