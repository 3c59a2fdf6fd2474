use std::{collections::BTreeMap, fs, path::PathBuf};

use {
    async_trait::async_trait,
    tokio::sync::Mutex,
    tracing::{debug, warn},
};

use crate::{Result, store::KeyValueStore};

type Entries = BTreeMap<String, String>;

/// Stores all keys as one JSON object in a file.
///
/// The file is created on first write. Writes go through a sibling temp file
/// followed by a rename so a crash never leaves a half-written object behind.
/// A file that does not parse is renamed to `*.json.corrupt` and treated as
/// empty.
pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn read_file(&self) -> Result<Entries> {
        if !self.path.exists() {
            return Ok(Entries::new());
        }
        let data = fs::read_to_string(&self.path)?;
        if data.trim().is_empty() {
            return Ok(Entries::new());
        }
        match serde_json::from_str(&data) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                // Move the unreadable file aside so the next write starts fresh.
                let aside = self.path.with_extension("json.corrupt");
                warn!(
                    path = %self.path.display(),
                    aside = %aside.display(),
                    error = %e,
                    "key-value file is not a JSON object, moving it aside"
                );
                fs::rename(&self.path, &aside)?;
                Ok(Entries::new())
            },
        }
    }

    fn write_file(&self, entries: &Entries) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, data)?;
        fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), keys = entries.len(), "wrote key-value file");
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.lock.lock().await;
        Ok(self.read_file()?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut entries = self.read_file()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_file(&entries)
    }

    async fn remove(&self, key: &str) -> Result<bool> {
        let _guard = self.lock.lock().await;
        let mut entries = self.read_file()?;
        let existed = entries.remove(key).is_some();
        if existed {
            self.write_file(&entries)?;
        }
        Ok(existed)
    }
}
