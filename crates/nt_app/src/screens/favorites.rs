use nt_core::{ArticleRecord, Result};
use nt_feed::Logger;
use nt_storage::{FavoritesEvent, FavoritesRepository};
use std::sync::Arc;
use tokio::sync::broadcast::{self, error::TryRecvError};
use crate::navigator::{Navigator, Route};

/// Favorites list. Local state is always a fresh read of the repository.
pub struct FavoritesController {
    favorites: Arc<FavoritesRepository>,
    events: broadcast::Receiver<FavoritesEvent>,
    items: Vec<ArticleRecord>,
    error: Option<String>,
    logger: Logger,
}

impl FavoritesController {
    pub async fn mount(favorites: Arc<FavoritesRepository>) -> Self {
        let events = favorites.subscribe();
        let mut controller = Self {
            favorites,
            events,
            items: Vec::new(),
            error: None,
            logger: Logger::new().with_prefix("[favorites]"),
        };
        controller.refresh().await;
        controller
    }

    pub fn items(&self) -> &[ArticleRecord] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Reload from the repository. On failure the current list is kept.
    pub async fn refresh(&mut self) {
        self.drain_events();
        let result = self.favorites.load_all().await;
        if let Some(items) = self.record("load favorites", result) {
            self.items = items;
        }
    }

    /// Remove the entry displayed at `index`, then reload.
    pub async fn remove_at(&mut self, index: usize) {
        let result = self.favorites.remove_by_index(&self.items, index).await;
        if self.record("remove favorite", result).is_some() {
            self.refresh().await;
        }
    }

    /// Reload if another screen changed favorites since the last look.
    /// Returns whether anything changed.
    pub async fn sync(&mut self) -> bool {
        let changed = self.drain_events();
        if changed {
            self.refresh().await;
        }
        changed
    }

    fn drain_events(&mut self) -> bool {
        let mut changed = false;
        loop {
            match self.events.try_recv() {
                Ok(event) => {
                    self.logger.debug(&format!("Saw {:?}", event));
                    changed = true;
                }
                Err(TryRecvError::Lagged(skipped)) => {
                    self.logger.debug(&format!("Skipped {} events", skipped));
                    changed = true;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
        changed
    }

    pub fn go_home(&self, navigator: &mut Navigator) {
        navigator.navigate(Route::News);
    }

    fn record<T>(&mut self, action: &str, result: Result<T>) -> Option<T> {
        match result {
            Ok(value) => {
                self.error = None;
                Some(value)
            }
            Err(e) => {
                self.logger.warn(&format!("Failed to {}: {}", action, e));
                self.error = Some(e.to_string());
                None
            }
        }
    }
}
