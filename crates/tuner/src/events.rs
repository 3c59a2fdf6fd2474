use {serde::Serialize, tuner_player::PlaybackState};

/// Change notifications for whatever renders the channel list and player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TunerEvent {
    ChannelsChanged {
        count: usize,
    },
    SelectionChanged {
        /// Selected channel id, `None` when nothing is selected.
        id: Option<String>,
        /// Full activation token of the selection.
        token: Option<String>,
    },
    PlaybackStateChanged {
        state: PlaybackState,
    },
}
