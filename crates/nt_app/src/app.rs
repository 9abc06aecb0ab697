use nt_core::{FeedGateway, KeyValueStore, Result};
use nt_storage::{FavoritesRepository, SessionStore};
use std::sync::Arc;
use tracing::info;
use crate::navigator::{Navigator, Route};
use crate::screens::{DetailController, FavoritesController, ListController, LoginController};

/// Wires the shared repository, session store and feed into the screens.
pub struct App {
    pub navigator: Navigator,
    favorites: Arc<FavoritesRepository>,
    session: SessionStore,
    gateway: Arc<dyn FeedGateway>,
}

impl App {
    pub fn new(store: Arc<dyn KeyValueStore>, gateway: Arc<dyn FeedGateway>) -> Self {
        Self {
            navigator: Navigator::default(),
            favorites: Arc::new(FavoritesRepository::new(store.clone())),
            session: SessionStore::new(store),
            gateway,
        }
    }

    pub fn favorites(&self) -> Arc<FavoritesRepository> {
        self.favorites.clone()
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Skip the login screen when a session marker is already stored.
    pub async fn resume(&mut self) -> Result<bool> {
        match self.session.current_user().await? {
            Some(user) => {
                info!("🔑 Resuming session for {}", user.email);
                if self.navigator.current() == &Route::Login {
                    self.navigator.navigate(Route::News);
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn login_screen(&self) -> LoginController {
        LoginController::new(self.session.clone())
    }

    pub fn news_screen(&self) -> ListController {
        ListController::new(self.gateway.clone())
    }

    /// Detail screen for the article carried by the current route.
    pub async fn detail_screen(&self) -> Option<DetailController> {
        let article = self.navigator.payload()?.clone();
        Some(DetailController::mount(self.favorites.clone(), article).await)
    }

    pub async fn favorites_screen(&self) -> FavoritesController {
        FavoritesController::mount(self.favorites.clone()).await
    }
}
