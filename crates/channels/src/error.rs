use crate::{channel::ChannelId, validate::ValidationError};

/// Crate-wide result type for registry operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// User input was rejected; nothing was mutated.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The referenced channel is no longer in the list.
    #[error("unknown channel: {id}")]
    NotFound { id: ChannelId },

    /// The persisted snapshot could not be parsed.
    #[error("persisted channel list is corrupt: {reason}")]
    Corrupt { reason: String },

    /// The key-value store could not be reached.
    #[error("channel store unavailable: {0}")]
    Store(#[from] tuner_store::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    #[must_use]
    pub fn corrupt(reason: impl std::fmt::Display) -> Self {
        Self::Corrupt {
            reason: reason.to_string(),
        }
    }

    /// True when the stored data itself is unusable, as opposed to the store
    /// being unreachable.
    pub fn is_corrupt(&self) -> bool {
        matches!(self, Self::Corrupt { .. })
    }

    #[must_use]
    pub fn not_found(id: ChannelId) -> Self {
        Self::NotFound { id }
    }
}
