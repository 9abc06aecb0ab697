pub mod error;
pub mod feed;
pub mod storage;
pub mod types;

pub use error::{Error, Result};
pub use feed::FeedGateway;
pub use storage::KeyValueStore;
pub use types::{ArticleRecord, UserData};

/// Persisted key holding the JSON array of favorite articles.
pub const FAVORITES_KEY: &str = "favoriteNewsItems";

/// Persisted key holding the logged-in user marker.
pub const USER_DATA_KEY: &str = "userData";
