use nt_core::{Error, KeyValueStore, Result, UserData, USER_DATA_KEY};
use std::sync::Arc;
use tracing::info;

/// Reads and writes the logged-in user marker.
#[derive(Clone)]
pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub async fn save_user(&self, user: &UserData) -> Result<()> {
        let text = serde_json::to_string(user)?;
        self.store.set(USER_DATA_KEY, &text).await?;
        info!("🔑 Session saved for {}", user.email);
        Ok(())
    }

    pub async fn current_user(&self) -> Result<Option<UserData>> {
        match self.store.get(USER_DATA_KEY).await? {
            Some(text) => serde_json::from_str(&text)
                .map(Some)
                .map_err(|e| Error::Decode(format!("{} is not a user record: {}", USER_DATA_KEY, e))),
            None => Ok(None),
        }
    }

    pub async fn clear(&self) -> Result<()> {
        self.store.remove(USER_DATA_KEY).await
    }
}
