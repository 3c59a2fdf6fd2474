/// Config schema types (storage, player, default channels).
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TunerConfig {
    pub storage: StorageConfig,
    pub player: PlayerConfig,
    pub defaults: DefaultsConfig,
}

/// Which key-value backend holds the channel list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process memory; nothing survives a restart.
    Memory,
    /// JSON object file.
    #[default]
    File,
    /// SQLite database.
    Sqlite,
}

impl StorageBackend {
    /// File name used under the data dir when no explicit path is set.
    pub fn default_file_name(self) -> Option<&'static str> {
        match self {
            Self::Memory => None,
            Self::File => Some("channels.json"),
            Self::Sqlite => Some("tuner.db"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Location of the file or database. Defaults to the user data dir.
    pub path: Option<PathBuf>,
    /// Key the channel list is stored under.
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            path: None,
            key: "channels".into(),
        }
    }
}

impl StorageConfig {
    /// Explicit path, or the backend's default file in the data dir.
    pub fn resolved_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.path {
            return Some(path.clone());
        }
        let name = self.backend.default_file_name()?;
        Some(
            crate::loader::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(name),
        )
    }
}

/// Settings baked into every rendered player document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub hls_script_url: String,
    pub autoplay: bool,
    pub muted: bool,
    pub background: String,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            hls_script_url: "https://cdn.jsdelivr.net/npm/hls.js@1".into(),
            autoplay: true,
            muted: false,
            background: "#000000".into(),
        }
    }
}

/// A channel given in configuration rather than entered by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelSeed {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Replaces the built-in first-run channels when set. An explicit empty
    /// list means "start with no channels".
    pub channels: Option<Vec<ChannelSeed>>,
}
