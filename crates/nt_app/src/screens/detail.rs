use nt_core::{ArticleRecord, Result};
use nt_feed::Logger;
use nt_storage::FavoritesRepository;
use std::sync::Arc;
use crate::navigator::{Navigator, Route};

/// Single article with an add/remove favorite toggle.
pub struct DetailController {
    favorites: Arc<FavoritesRepository>,
    article: ArticleRecord,
    is_favorite: bool,
    error: Option<String>,
    logger: Logger,
}

impl DetailController {
    /// Build the screen and check favorite status once.
    pub async fn mount(favorites: Arc<FavoritesRepository>, article: ArticleRecord) -> Self {
        let mut controller = Self {
            favorites,
            article,
            is_favorite: false,
            error: None,
            logger: Logger::new().with_prefix("[detail]"),
        };
        controller.refresh().await;
        controller
    }

    pub fn article(&self) -> &ArticleRecord {
        &self.article
    }

    pub fn is_favorite(&self) -> bool {
        self.is_favorite
    }

    pub fn last_error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Re-read favorite status from the repository.
    pub async fn refresh(&mut self) {
        let result = self.favorites.is_favorite(self.article.key()).await;
        if let Some(is_favorite) = self.record("check favorite", result) {
            self.is_favorite = is_favorite;
        }
    }

    pub async fn add_to_favorites(&mut self) {
        let result = self.favorites.add(&self.article).await;
        if self.record("add favorite", result).is_some() {
            self.is_favorite = true;
        }
    }

    pub async fn remove_from_favorites(&mut self) {
        let result = self.favorites.remove_by_title(self.article.key()).await;
        if self.record("remove favorite", result).is_some() {
            self.is_favorite = false;
        }
    }

    /// Flip favorite status. The flag only changes once the write succeeded.
    pub async fn toggle(&mut self) {
        if self.is_favorite {
            self.remove_from_favorites().await;
        } else {
            self.add_to_favorites().await;
        }
    }

    pub fn open_favorites(&self, navigator: &mut Navigator) {
        navigator.navigate(Route::FavoritesNews);
    }

    fn record<T>(&mut self, action: &str, result: Result<T>) -> Option<T> {
        match result {
            Ok(value) => {
                self.error = None;
                Some(value)
            }
            Err(e) => {
                self.logger.warn(&format!("Failed to {} for {}: {}", action, self.article.title, e));
                self.error = Some(e.to_string());
                None
            }
        }
    }
}
