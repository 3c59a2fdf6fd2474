use std::fmt;

use uuid::Uuid;

use crate::validate::{ValidationError, validate};

/// Stable identity of a channel inside one registry.
///
/// Ids are assigned when a channel is created or loaded and are never
/// persisted, so two channels with identical name and URL stay distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChannelId(Uuid);

impl ChannelId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ChannelId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A named stream endpoint. Immutable once built; edits produce a new value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    id: ChannelId,
    name: String,
    url: String,
}

impl Channel {
    /// Build a channel from user input, assigning a fresh id.
    pub fn new(name: &str, url: &str) -> Result<Self, ValidationError> {
        let (name, url) = validate(name, url)?;
        Ok(Self {
            id: ChannelId::new(),
            name,
            url,
        })
    }

    pub fn id(&self) -> ChannelId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// True when both channels carry the same name and URL, regardless of
    /// identity.
    pub fn same_value(&self, other: &Self) -> bool {
        self.name == other.name && self.url == other.url
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.url)
    }
}
