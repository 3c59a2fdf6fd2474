//! Built-in channel list used when nothing usable is persisted.

use tracing::warn;

use crate::{channel::Channel, snapshot::ChannelRecord};

/// The two example channels seeded on first run.
pub fn builtin() -> Vec<ChannelRecord> {
    vec![
        ChannelRecord::new(
            "Big Buck Bunny",
            "https://test-streams.mux.dev/x36xhzz/x36xhzz.m3u8",
        ),
        ChannelRecord::new(
            "Apple fMP4 Bipbop",
            "https://devstreaming-cdn.apple.com/videos/streaming/examples/img_bipbop_adv_example_fmp4/master.m3u8",
        ),
    ]
}

/// Turn seed records into channels with fresh ids.
///
/// Seeds come from code or configuration, so an invalid one is skipped with a
/// warning instead of failing startup.
pub fn materialize(seeds: &[ChannelRecord]) -> Vec<Channel> {
    seeds
        .iter()
        .filter_map(|seed| match Channel::try_from(seed) {
            Ok(channel) => Some(channel),
            Err(e) => {
                warn!(name = %seed.name, url = %seed.url, error = %e, "skipping invalid default channel");
                None
            },
        })
        .collect()
}
