use tracing::{debug, info, warn};

use crate::{
    Error, Result,
    channel::{Channel, ChannelId},
    defaults,
    persistence::{Loaded, PersistenceGateway},
    snapshot::ChannelRecord,
    validate::ValidationError,
};

/// Where the current list came from on the last bootstrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapSource {
    /// Decoded from the store.
    Persisted,
    /// Nothing was stored yet.
    DefaultsEmptyStore,
    /// The stored snapshot was unreadable and has been cleared.
    DefaultsCorrupt,
    /// The store could not be read; nothing was cleared.
    DefaultsUnavailable,
}

/// The authoritative ordered channel list and its mutation API.
#[derive(Debug)]
pub struct ChannelRegistry {
    channels: Vec<Channel>,
    gateway: PersistenceGateway,
    seeds: Vec<ChannelRecord>,
    source: Option<BootstrapSource>,
}

impl ChannelRegistry {
    /// Create an empty registry. Call [`bootstrap`](Self::bootstrap) before use.
    pub fn new(gateway: PersistenceGateway, seeds: Vec<ChannelRecord>) -> Self {
        Self {
            channels: Vec::new(),
            gateway,
            seeds,
            source: None,
        }
    }

    /// Registry seeded with the built-in default channels.
    pub fn with_builtin_defaults(gateway: PersistenceGateway) -> Self {
        Self::new(gateway, defaults::builtin())
    }

    /// Replace the in-memory list with the persisted one, falling back to the
    /// default list when nothing usable is stored.
    ///
    /// Never fails. Defaults are not written back; the store is only touched
    /// again by the next mutation.
    pub async fn bootstrap(&mut self) -> &[Channel] {
        let source = match self.gateway.load().await {
            Ok(Loaded::Channels(channels)) => {
                self.channels = channels;
                BootstrapSource::Persisted
            },
            Ok(Loaded::Empty) => {
                self.channels = defaults::materialize(&self.seeds);
                BootstrapSource::DefaultsEmptyStore
            },
            Err(e) if e.is_corrupt() => {
                warn!(key = %self.gateway.key(), error = %e, "discarding corrupt channel list");
                if let Err(e) = self.gateway.clear().await {
                    warn!(key = %self.gateway.key(), error = %e, "failed to clear corrupt channel list");
                }
                self.channels = defaults::materialize(&self.seeds);
                BootstrapSource::DefaultsCorrupt
            },
            Err(e) => {
                warn!(key = %self.gateway.key(), error = %e, "channel store unavailable, using defaults");
                self.channels = defaults::materialize(&self.seeds);
                BootstrapSource::DefaultsUnavailable
            },
        };
        info!(count = self.channels.len(), ?source, "channel list loaded");
        self.source = Some(source);
        &self.channels
    }

    /// Validate and append a channel, then persist.
    pub fn add(&mut self, name: &str, url: &str) -> std::result::Result<Channel, ValidationError> {
        let channel = Channel::new(name, url)?;
        self.channels.push(channel.clone());
        self.gateway.save(&self.channels);
        debug!(id = %channel.id(), name = %channel.name(), "channel added");
        Ok(channel)
    }

    /// Replace `target` in place with a new channel built from the input.
    ///
    /// The replacement gets a fresh id. Input is validated before membership
    /// is checked; neither failure mutates the list.
    pub fn edit(&mut self, target: ChannelId, name: &str, url: &str) -> Result<Channel> {
        let channel = Channel::new(name, url)?;
        let index = self.position(target).ok_or(Error::not_found(target))?;
        self.channels[index] = channel.clone();
        self.gateway.save(&self.channels);
        debug!(old = %target, new = %channel.id(), index, "channel edited");
        Ok(channel)
    }

    /// Remove `target` if present. Returns whether anything was removed.
    pub fn remove(&mut self, target: ChannelId) -> bool {
        let Some(index) = self.position(target) else {
            debug!(id = %target, "remove ignored, channel not found");
            return false;
        };
        self.channels.remove(index);
        self.gateway.save(&self.channels);
        debug!(id = %target, index, "channel removed");
        true
    }

    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    pub fn get(&self, id: ChannelId) -> Option<&Channel> {
        self.channels.iter().find(|c| c.id() == id)
    }

    pub fn position(&self, id: ChannelId) -> Option<usize> {
        self.channels.iter().position(|c| c.id() == id)
    }

    pub fn first(&self) -> Option<&Channel> {
        self.channels.first()
    }

    pub fn contains(&self, id: ChannelId) -> bool {
        self.position(id).is_some()
    }

    /// How the last [`bootstrap`](Self::bootstrap) obtained its list.
    pub fn source(&self) -> Option<BootstrapSource> {
        self.source
    }

    /// Wait for queued saves to reach the store.
    pub async fn flush(&self) {
        self.gateway.flush().await;
    }
}
