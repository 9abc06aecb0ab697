use async_trait::async_trait;
use nt_core::{Error, KeyValueStore, Result};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

pub mod backends;
pub mod favorites;
pub mod session;

pub use backends::*;
pub use favorites::{FavoritesEvent, FavoritesRepository};
pub use session::SessionStore;

/// A key-value backend that can be opened from a path.
#[async_trait]
pub trait StorageBackend: KeyValueStore + Sized {
    fn get_error_message() -> &'static str;
    async fn open(path: &Path) -> Result<Self>;
}

/// Backend names accepted by [`create_store`].
pub fn available_backends() -> Vec<&'static str> {
    let mut names = vec!["memory"];
    if cfg!(feature = "sqlite") {
        names.push("sqlite");
    }
    names
}

async fn open_backend<T: StorageBackend + 'static>(path: &Path) -> Result<Arc<dyn KeyValueStore>> {
    let store = T::open(path).await.map_err(|e| {
        Error::Store(format!("{} ({})", T::get_error_message(), e))
    })?;
    info!("💾 Opened {} store", store.name());
    Ok(Arc::new(store))
}

/// Open the key-value store named `kind`. `path` is ignored by volatile backends.
pub async fn create_store(kind: &str, path: &Path) -> Result<Arc<dyn KeyValueStore>> {
    match kind {
        "memory" => open_backend::<InMemoryStore>(path).await,
        #[cfg(feature = "sqlite")]
        "sqlite" => open_backend::<SqliteStore>(path).await,
        other => Err(Error::Store(format!(
            "Unknown storage backend: {} (available: {})",
            other,
            available_backends().join(", ")
        ))),
    }
}

pub mod prelude {
    pub use super::backends::*;
    pub use super::{create_store, FavoritesRepository, SessionStore, StorageBackend};
}
