use async_trait::async_trait;
use crate::Result;

/// Asynchronous string key-value store that survives restarts.
///
/// Every call may fail; callers decide whether to surface or log the error.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Short backend name used in logs
    fn name(&self) -> &str;

    /// Read the text stored under `key`, `None` when the key was never written
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the text stored under `key`
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete `key`; deleting a missing key is not an error
    async fn remove(&self, key: &str) -> Result<()>;
}
