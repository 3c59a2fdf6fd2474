//! Asynchronous string key-value stores.
//!
//! The channel list is persisted as a single string value under one key, so
//! every backend only needs `get`, `set` and `remove`. Three implementations
//! are provided: process memory, a JSON file on disk, and SQLite.

pub mod error;
pub mod file;
pub mod memory;
pub mod sqlite;
pub mod store;

pub use {
    error::{Error, Result},
    file::JsonFileStore,
    memory::MemoryStore,
    sqlite::SqliteStore,
    store::KeyValueStore,
};
