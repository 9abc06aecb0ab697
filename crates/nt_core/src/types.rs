use serde::{Deserialize, Deserializer, Serialize};

/// A single news article as shown on every screen and stored in favorites.
///
/// The wire names match the news provider (`urlToImage`, `title`,
/// `description`) so the persisted favorites blob is the same JSON the feed
/// returned. Unknown fields are ignored on decode. `title` is the identity
/// key: two records with the same title are the same favorite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    #[serde(rename = "urlToImage", default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
}

impl ArticleRecord {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            image_url: None,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.image_url = if url.is_empty() { None } else { Some(url) };
        self
    }

    /// Identity used for favorites dedup and removal.
    pub fn key(&self) -> &str {
        &self.title
    }
}

/// Minimal session marker written on login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserData {
    pub email: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
