pub mod config;
pub mod logging;
pub mod newsapi;

pub use config::FeedConfig;
pub use logging::{init_logging, Logger};
pub use newsapi::NewsApiGateway;

pub mod prelude {
    pub use super::{FeedConfig, NewsApiGateway};
    pub use nt_core::{ArticleRecord, Error, FeedGateway, Result};
}
