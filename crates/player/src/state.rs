use {serde::Serialize, std::fmt};

/// Lifecycle of the single playback slot.
///
/// `Error` is not terminal; it is left only through a reload cycle or a list
/// mutation that changes the selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackState {
    /// Nothing selected, nothing rendered.
    #[default]
    Empty,
    /// A document was handed to the surface and it has not reported back yet.
    Loading,
    /// The surface reported the document as created.
    Playing,
    /// The surface reported a load failure.
    Error,
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty"),
            Self::Loading => write!(f, "loading"),
            Self::Playing => write!(f, "playing"),
            Self::Error => write!(f, "error"),
        }
    }
}
