use std::sync::Arc;

use {
    tracing::info,
    tuner_config::{StorageBackend, StorageConfig},
    tuner_store::{JsonFileStore, KeyValueStore, MemoryStore, SqliteStore},
};

use crate::{Error, Result};

/// Open the key-value backend named by `config`.
pub async fn open_store(config: &StorageConfig) -> Result<Arc<dyn KeyValueStore>> {
    if config.backend == StorageBackend::Memory {
        info!(backend = "memory", "channel store opened");
        return Ok(Arc::new(MemoryStore::new()));
    }

    let path = config
        .resolved_path()
        .ok_or(Error::MissingStoragePath {
            backend: config.backend,
        })?;

    let store: Arc<dyn KeyValueStore> = match config.backend {
        StorageBackend::Sqlite => Arc::new(SqliteStore::open(&path).await?),
        StorageBackend::File | StorageBackend::Memory => Arc::new(JsonFileStore::new(path.clone())),
    };
    info!(backend = ?config.backend, path = %path.display(), "channel store opened");
    Ok(store)
}
