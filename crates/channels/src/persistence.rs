//! Bridge between the in-memory channel list and a [`KeyValueStore`].
//!
//! Saves are fire-and-forget: [`PersistenceGateway::save`] encodes the list and
//! hands it to a single writer task, so writes reach the store in the order
//! they were issued and never block the caller. Failed writes are logged and
//! dropped.

use std::sync::Arc;

use {
    tokio::sync::{mpsc, oneshot},
    tracing::{debug, warn},
    tuner_store::KeyValueStore,
};

use crate::{Error, Result, channel::Channel, snapshot};

/// Outcome of reading the persisted list.
#[derive(Debug)]
pub enum Loaded {
    Channels(Vec<Channel>),
    /// The key is absent or holds only whitespace.
    Empty,
}

enum WriteOp {
    Save(String),
    Clear(oneshot::Sender<tuner_store::Result<bool>>),
    Flush(oneshot::Sender<()>),
}

pub struct PersistenceGateway {
    store: Arc<dyn KeyValueStore>,
    key: String,
    write_tx: mpsc::UnboundedSender<WriteOp>,
}

impl PersistenceGateway {
    /// Create the gateway and spawn its writer task.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let key = key.into();
        let (write_tx, write_rx) = mpsc::unbounded_channel();
        tokio::spawn(writer_loop(Arc::clone(&store), key.clone(), write_rx));
        Self {
            store,
            key,
            write_tx,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read and decode the persisted list.
    ///
    /// Pending saves are flushed first so a reload observes every mutation
    /// issued before it.
    pub async fn load(&self) -> Result<Loaded> {
        self.flush().await;
        let Some(raw) = self.store.get(&self.key).await? else {
            return Ok(Loaded::Empty);
        };
        if raw.trim().is_empty() {
            return Ok(Loaded::Empty);
        }
        snapshot::decode(&raw).map(Loaded::Channels)
    }

    /// Queue a full snapshot write. Never fails from the caller's view.
    pub fn save(&self, channels: &[Channel]) {
        let json = match snapshot::encode(channels) {
            Ok(json) => json,
            Err(e) => {
                warn!(key = %self.key, error = %e, "failed to encode channel list, save dropped");
                return;
            },
        };
        if self.write_tx.send(WriteOp::Save(json)).is_err() {
            warn!(key = %self.key, "persistence writer stopped, save dropped");
        }
    }

    /// Remove the stored key. Ordered after every save issued before it.
    pub async fn clear(&self) -> Result<bool> {
        let (tx, rx) = oneshot::channel();
        self.write_tx
            .send(WriteOp::Clear(tx))
            .map_err(|_| tuner_store::Error::unavailable("persistence writer stopped"))?;
        let removed = rx
            .await
            .map_err(|_| tuner_store::Error::unavailable("persistence writer stopped"))??;
        Ok(removed)
    }

    /// Wait until every save issued before this call has been attempted.
    pub async fn flush(&self) {
        let (tx, rx) = oneshot::channel();
        if self.write_tx.send(WriteOp::Flush(tx)).is_ok() {
            let _ = rx.await;
        }
    }
}

async fn writer_loop(
    store: Arc<dyn KeyValueStore>,
    key: String,
    mut write_rx: mpsc::UnboundedReceiver<WriteOp>,
) {
    while let Some(op) = write_rx.recv().await {
        match op {
            WriteOp::Save(json) => match store.set(&key, &json).await {
                Ok(()) => debug!(key = %key, bytes = json.len(), "saved channel list"),
                Err(e) => warn!(key = %key, error = %e, "failed to save channel list"),
            },
            WriteOp::Clear(done) => {
                let result = store.remove(&key).await;
                if let Err(e) = &result {
                    warn!(key = %key, error = %e, "failed to clear channel list");
                }
                let _ = done.send(result);
            },
            WriteOp::Flush(done) => {
                let _ = done.send(());
            },
        }
    }
    debug!(key = %key, "persistence writer stopped");
}

impl std::fmt::Debug for PersistenceGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistenceGateway")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}
