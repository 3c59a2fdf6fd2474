use async_trait::async_trait;

use crate::Result;

/// Opaque asynchronous string-keyed store.
///
/// Implementations must serialize concurrent writes to the same key; callers
/// rely on last-write-wins.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> Result<()>;
    /// Remove a key. Returns `true` if a value was present.
    async fn remove(&self, key: &str) -> Result<bool>;
}
