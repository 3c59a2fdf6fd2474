//! Default configuration template with all options documented.
//!
//! Written when the host asks for a config file to be created, so users can
//! see every setting even if they never change one.

/// Generate the default config template.
///
/// Every uncommented value equals the built-in default.
pub fn default_config_template() -> String {
    r##"# Tuner Configuration
# ===================
# Uncomment and modify settings as needed.
# Changes take effect on the next start.
#
# Environment variable substitution is supported: ${ENV_VAR}
# A fallback can be given: ${ENV_VAR:-value}

# ══════════════════════════════════════════════════════════════════════════════
# STORAGE
# ══════════════════════════════════════════════════════════════════════════════

[storage]
backend = "file"                  # "file" (JSON), "sqlite", or "memory" (not persisted)
# path = "/path/to/channels.json" # Defaults to the user data directory
key = "channels"                  # Key the channel list is stored under

# ══════════════════════════════════════════════════════════════════════════════
# PLAYER
# ══════════════════════════════════════════════════════════════════════════════

[player]
hls_script_url = "https://cdn.jsdelivr.net/npm/hls.js@1"   # hls.js build loaded by the player
autoplay = true                   # Start playback as soon as the stream is attached
muted = false                     # Start muted (some engines only autoplay when muted)
background = "#000000"            # CSS colour behind the video

# ══════════════════════════════════════════════════════════════════════════════
# FIRST-RUN CHANNELS
# ══════════════════════════════════════════════════════════════════════════════
# Used when nothing is stored yet, or the stored list is unreadable.
# Leave commented out to use the two built-in example streams.
#
# [[defaults.channels]]
# name = "Local camera"
# url = "http://192.168.1.20:8080/live/index.m3u8"
"##
    .to_string()
}
