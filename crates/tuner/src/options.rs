use {
    tuner_channels::ChannelRecord,
    tuner_config::{PlayerConfig, TunerConfig},
    tuner_player::PlayerOptions,
};

/// Everything a [`Tuner`](crate::Tuner) needs besides its store and surface.
#[derive(Debug, Clone)]
pub struct TunerOptions {
    /// Key the channel list is stored under.
    pub storage_key: String,
    /// First-run channels. `None` uses the built-in list.
    pub seeds: Option<Vec<ChannelRecord>>,
    pub player: PlayerOptions,
}

impl Default for TunerOptions {
    fn default() -> Self {
        Self {
            storage_key: "channels".into(),
            seeds: None,
            player: PlayerOptions::default(),
        }
    }
}

fn player_options(cfg: &PlayerConfig) -> PlayerOptions {
    PlayerOptions {
        hls_script_url: cfg.hls_script_url.clone(),
        autoplay: cfg.autoplay,
        muted: cfg.muted,
        background: cfg.background.clone(),
    }
}

impl From<&TunerConfig> for TunerOptions {
    fn from(cfg: &TunerConfig) -> Self {
        Self {
            storage_key: cfg.storage.key.clone(),
            seeds: cfg.defaults.channels.as_ref().map(|seeds| {
                seeds
                    .iter()
                    .map(|s| ChannelRecord::new(s.name.clone(), s.url.clone()))
                    .collect()
            }),
            player: player_options(&cfg.player),
        }
    }
}
