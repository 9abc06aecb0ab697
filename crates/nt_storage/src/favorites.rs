use nt_core::{ArticleRecord, Error, KeyValueStore, Result, FAVORITES_KEY};
use std::fmt;
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info};

const EVENT_CAPACITY: usize = 64;

/// Change notification sent after a favorites write has been persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FavoritesEvent {
    Added(String),
    Removed(String),
}

/// Owner of the persisted favorites list.
///
/// The list lives as a JSON array under [`FAVORITES_KEY`]. Every mutation is a
/// full read-modify-write of that entry, serialized through `write_lock` so two
/// screens mutating at once cannot clobber each other. Entries are unique by
/// title.
pub struct FavoritesRepository {
    store: Arc<dyn KeyValueStore>,
    write_lock: Mutex<()>,
    events: broadcast::Sender<FavoritesEvent>,
}

impl fmt::Debug for FavoritesRepository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FavoritesRepository")
            .field("store", &self.store.name())
            .field("subscribers", &self.events.receiver_count())
            .finish()
    }
}

impl FavoritesRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            store,
            write_lock: Mutex::new(()),
            events,
        }
    }

    /// Receive an event for every persisted add or remove.
    pub fn subscribe(&self) -> broadcast::Receiver<FavoritesEvent> {
        self.events.subscribe()
    }

    /// Read the whole list. A missing or empty entry is an empty list.
    pub async fn load_all(&self) -> Result<Vec<ArticleRecord>> {
        let Some(text) = self.store.get(FAVORITES_KEY).await? else {
            return Ok(Vec::new());
        };
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&text)
            .map_err(|e| Error::Decode(format!("{} is not a list of articles: {}", FAVORITES_KEY, e)))
    }

    /// Exact, case-sensitive title lookup.
    pub async fn is_favorite(&self, title: &str) -> Result<bool> {
        let items = self.load_all().await?;
        Ok(items.iter().any(|item| item.key() == title))
    }

    /// Append `item` unless an entry with the same title exists.
    /// Returns whether the list changed.
    pub async fn add(&self, item: &ArticleRecord) -> Result<bool> {
        let _guard = self.write_lock.lock().await;
        let mut items = self.load_all().await?;

        if items.iter().any(|existing| existing.key() == item.key()) {
            debug!("⏭️ Already a favorite: {}", item.title);
            return Ok(false);
        }

        items.push(item.clone());
        self.persist(&items).await?;
        info!("⭐ Added favorite: {}", item.title);
        let _ = self.events.send(FavoritesEvent::Added(item.title.clone()));
        Ok(true)
    }

    /// Remove the first entry titled `title`. Returns whether the list changed.
    pub async fn remove_by_title(&self, title: &str) -> Result<bool> {
        let _guard = self.write_lock.lock().await;
        let mut items = self.load_all().await?;

        let Some(position) = items.iter().position(|item| item.key() == title) else {
            debug!("⏭️ Not a favorite: {}", title);
            return Ok(false);
        };

        items.remove(position);
        self.persist(&items).await?;
        info!("🗑️ Removed favorite: {}", title);
        let _ = self.events.send(FavoritesEvent::Removed(title.to_string()));
        Ok(true)
    }

    /// Remove the entry shown at `index` of a caller-held `snapshot`.
    ///
    /// The position is resolved to a title and removed against the stored list,
    /// so a stale snapshot never drops the wrong entry. Out of bounds is a no-op.
    pub async fn remove_by_index(&self, snapshot: &[ArticleRecord], index: usize) -> Result<bool> {
        match snapshot.get(index) {
            Some(item) => self.remove_by_title(item.key()).await,
            None => {
                debug!("⏭️ Index {} out of bounds for {} favorites", index, snapshot.len());
                Ok(false)
            }
        }
    }

    async fn persist(&self, items: &[ArticleRecord]) -> Result<()> {
        let text = serde_json::to_string(items)?;
        self.store.set(FAVORITES_KEY, &text).await
    }
}
