//! Persisted form of the channel list.
//!
//! The snapshot is a JSON array of `{ "name", "url" }` records in display
//! order. There is no version field; anything that does not decode as that
//! exact shape is rejected as a whole.

use serde::{Deserialize, Serialize};

use crate::{Error, Result, channel::Channel};

/// One persisted channel. Extra fields are ignored on read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelRecord {
    pub name: String,
    pub url: String,
}

impl ChannelRecord {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

impl From<&Channel> for ChannelRecord {
    fn from(c: &Channel) -> Self {
        Self::new(c.name(), c.url())
    }
}

impl TryFrom<&ChannelRecord> for Channel {
    type Error = crate::ValidationError;

    fn try_from(r: &ChannelRecord) -> std::result::Result<Self, Self::Error> {
        Channel::new(&r.name, &r.url)
    }
}

/// Serialize the full list.
pub fn encode(channels: &[Channel]) -> Result<String> {
    let records: Vec<ChannelRecord> = channels.iter().map(ChannelRecord::from).collect();
    Ok(serde_json::to_string(&records)?)
}

/// Decode a non-empty snapshot, assigning fresh ids.
///
/// A record that decodes but would not pass input validation also fails the
/// whole snapshot: the list must never hold a channel the user could not
/// have entered.
pub fn decode(raw: &str) -> Result<Vec<Channel>> {
    let records: Vec<ChannelRecord> = serde_json::from_str(raw).map_err(Error::corrupt)?;
    records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            Channel::try_from(record).map_err(|e| Error::corrupt(format!("record {i}: {e}")))
        })
        .collect()
}
