use nt_core::{ArticleRecord, FeedGateway};
use nt_feed::Logger;
use std::sync::Arc;
use crate::navigator::{Navigator, Route};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ListState {
    #[default]
    Idle,
    Loading,
    Loaded(Vec<ArticleRecord>),
}

/// News list with a search box.
pub struct ListController {
    gateway: Arc<dyn FeedGateway>,
    state: ListState,
    pub search_text: String,
    error: Option<String>,
    logger: Logger,
}

impl ListController {
    pub fn new(gateway: Arc<dyn FeedGateway>) -> Self {
        Self {
            gateway,
            state: ListState::Idle,
            search_text: String::new(),
            error: None,
            logger: Logger::new().with_prefix("[news]"),
        }
    }

    /// First load with whatever is in the search box.
    pub async fn mount(&mut self) -> bool {
        self.fetch().await
    }

    pub async fn submit_search(&mut self, text: impl Into<String>) -> bool {
        self.search_text = text.into();
        self.fetch().await
    }

    /// On failure the previous list stays on screen.
    async fn fetch(&mut self) -> bool {
        let previous = std::mem::replace(&mut self.state, ListState::Loading);
        let result = self.gateway.search(Some(&self.search_text)).await;
        match result {
            Ok(items) => {
                self.logger.debug(&format!("Loaded {} articles", items.len()));
                self.state = ListState::Loaded(items);
                self.error = None;
                true
            }
            Err(e) => {
                self.logger.warn(&format!("Failed to fetch news: {}", e));
                self.state = previous;
                self.error = Some(e.to_string());
                false
            }
        }
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    pub fn items(&self) -> &[ArticleRecord] {
        match &self.state {
            ListState::Loaded(items) => items,
            _ => &[],
        }
    }

    pub fn last_error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Open the detail screen for the article at `index`.
    pub fn select(&self, index: usize, navigator: &mut Navigator) -> bool {
        match self.items().get(index) {
            Some(article) => {
                navigator.navigate(Route::SingleNews(article.clone()));
                true
            }
            None => false,
        }
    }

    pub fn open_favorites(&self, navigator: &mut Navigator) {
        navigator.navigate(Route::FavoritesNews);
    }
}
