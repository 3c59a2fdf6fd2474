//! The inline adaptive-bitrate player document.

use {
    askama::Template,
    serde::{Deserialize, Serialize},
};

use crate::{Error, Result};

pub const DEFAULT_HLS_SCRIPT_URL: &str = "https://cdn.jsdelivr.net/npm/hls.js@1";

/// Fixed player settings, shared by every rendered document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerOptions {
    /// Where the document loads hls.js from.
    pub hls_script_url: String,
    pub autoplay: bool,
    pub muted: bool,
    /// CSS colour behind the video.
    pub background: String,
}

impl Default for PlayerOptions {
    fn default() -> Self {
        Self {
            hls_script_url: DEFAULT_HLS_SCRIPT_URL.into(),
            autoplay: true,
            muted: false,
            background: "#000000".into(),
        }
    }
}

#[derive(Template)]
#[template(path = "player.html", escape = "html")]
struct PlayerHtmlTemplate<'a> {
    hls_script_url: &'a str,
    background: &'a str,
    autoplay: bool,
    muted: bool,
    stream_url_json: &'a str,
}

/// Render the player document for `stream_url`.
pub fn render_player(options: &PlayerOptions, stream_url: &str) -> Result<String> {
    let stream_url_json = script_safe_json(stream_url)?;
    PlayerHtmlTemplate {
        hls_script_url: &options.hls_script_url,
        background: &options.background,
        autoplay: options.autoplay,
        muted: options.muted,
        stream_url_json: &stream_url_json,
    }
    .render()
    .map_err(Error::render)
}

/// Script that makes the rendered document re-layout after a fullscreen
/// transition.
pub fn resize_script(fullscreen: bool) -> String {
    format!("window.tunerLayout && window.tunerLayout({fullscreen});")
}

/// JSON string literal that is safe to place inside a `<script>` element.
fn script_safe_json(value: &str) -> Result<String> {
    let json = serde_json::to_string(value).map_err(Error::render)?;
    Ok(json
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
        .replace('\u{2028}', "\\u2028")
        .replace('\u{2029}', "\\u2029"))
}
