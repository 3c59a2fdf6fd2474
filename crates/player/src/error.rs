use tuner_channels::ChannelId;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Only members of the current list can be selected.
    #[error("channel {id} is not in the current list")]
    NotInList { id: ChannelId },

    #[error("failed to render player document: {message}")]
    Render { message: String },
}

impl Error {
    #[must_use]
    pub fn render(message: impl std::fmt::Display) -> Self {
        Self::Render {
            message: message.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
