use tuner_channels::ValidationError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Channels(tuner_channels::Error),

    #[error(transparent)]
    Player(#[from] tuner_player::Error),

    #[error(transparent)]
    Store(#[from] tuner_store::Error),

    #[error("storage backend {backend:?} needs a path")]
    MissingStoragePath { backend: tuner_config::StorageBackend },
}

impl From<tuner_channels::Error> for Error {
    /// Input rejections surface as [`Error::Validation`] whichever layer
    /// caught them.
    fn from(err: tuner_channels::Error) -> Self {
        match err {
            tuner_channels::Error::Validation(e) => Self::Validation(e),
            other => Self::Channels(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
