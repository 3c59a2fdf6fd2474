//! Turns the active channel into directives for the player surface and
//! interprets what the surface reports back.

use {
    base64::{Engine, engine::general_purpose::STANDARD},
    tracing::{debug, info, warn},
    tuner_channels::Channel,
};

use crate::{
    Result,
    state::PlaybackState,
    surface::SurfaceError,
    template::{self, PlayerOptions},
    token::ActivationToken,
};

/// Inline document the surface must load in place of its current content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderDirective {
    pub token: ActivationToken,
    pub html: String,
    pub content_type: &'static str,
    pub encoding: &'static str,
}

/// What the owner should do after a surface error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryAction {
    /// Re-run the registry bootstrap and re-derive the selection.
    Reload,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationDecision {
    Allow,
    Cancel,
}

/// URIs under which a surface addresses an inline document.
const INLINE_DOCUMENT_URIS: &[&str] = &["about:blank", "about:srcdoc"];

/// The document last handed to the surface.
#[derive(Debug)]
struct Rendered {
    token: ActivationToken,
    html: String,
    /// The surface has not navigated to the document yet.
    awaiting_navigation: bool,
}

#[derive(Debug)]
pub struct PlaybackBinding {
    options: PlayerOptions,
    state: PlaybackState,
    rendered: Option<Rendered>,
}

impl PlaybackBinding {
    pub fn new(options: PlayerOptions) -> Self {
        Self {
            options,
            state: PlaybackState::Empty,
            rendered: None,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn options(&self) -> &PlayerOptions {
        &self.options
    }

    /// Token of the document currently on the surface, if any.
    pub fn rendered(&self) -> Option<&ActivationToken> {
        self.rendered.as_ref().map(|r| &r.token)
    }

    /// Build the document for `channel` and move to `Loading`.
    ///
    /// Only the URL reaches the document.
    pub fn render(&mut self, channel: &Channel) -> Result<RenderDirective> {
        let token = ActivationToken::for_url(channel.url());
        let html = template::render_player(&self.options, channel.url())?;
        debug!(%token, bytes = html.len(), "rendered player document");
        self.rendered = Some(Rendered {
            token: token.clone(),
            html: html.clone(),
            awaiting_navigation: true,
        });
        self.state = PlaybackState::Loading;
        Ok(RenderDirective {
            token,
            html,
            content_type: "text/html",
            encoding: "utf-8",
        })
    }

    /// Forget the rendered document and move to `Empty`.
    pub fn clear(&mut self) {
        self.rendered = None;
        self.state = PlaybackState::Empty;
    }

    /// The surface finished creating the document.
    pub fn on_created(&mut self) {
        if let Some(rendered) = &mut self.rendered {
            rendered.awaiting_navigation = false;
            self.state = PlaybackState::Playing;
        }
    }

    /// Record a render failure so the slot does not look like it is loading.
    pub fn on_render_failed(&mut self) {
        self.rendered = None;
        self.state = PlaybackState::Error;
    }

    pub fn on_surface_error(&mut self, error: &SurfaceError) -> RecoveryAction {
        match error {
            SurfaceError::Load { .. } if self.rendered.is_none() => {
                debug!(error = %error, "surface load error with nothing rendered, ignored");
                RecoveryAction::None
            },
            SurfaceError::Load { .. } => {
                warn!(error = %error, "player surface failed to load, reloading channels");
                self.state = PlaybackState::Error;
                RecoveryAction::Reload
            },
            SurfaceError::Http { .. } => {
                info!(error = %error, "player surface reported http error");
                RecoveryAction::None
            },
        }
    }

    /// Only the rendered inline document may be shown, and only once per
    /// render; every other navigation is cancelled.
    pub fn guard_navigation(&mut self, requested_uri: &str) -> NavigationDecision {
        if let Some(rendered) = &mut self.rendered
            && rendered.awaiting_navigation
            && addresses_document(requested_uri, &rendered.html)
        {
            rendered.awaiting_navigation = false;
            return NavigationDecision::Allow;
        }
        debug!(uri = %requested_uri, "navigation cancelled");
        NavigationDecision::Cancel
    }

    /// Script to run after a fullscreen transition, if a document is shown.
    pub fn fullscreen_script(&self, fullscreen: bool) -> Option<String> {
        self.rendered
            .as_ref()
            .map(|_| template::resize_script(fullscreen))
    }
}

/// Whether `uri` names the inline document `html`: a blank/srcdoc alias, or a
/// `data:` URI carrying exactly that document.
fn addresses_document(uri: &str, html: &str) -> bool {
    let uri = uri.trim();
    if INLINE_DOCUMENT_URIS
        .iter()
        .any(|inline| uri.eq_ignore_ascii_case(inline))
    {
        return true;
    }
    let Some(rest) = uri
        .get(..5)
        .filter(|scheme| scheme.eq_ignore_ascii_case("data:"))
        .and_then(|_| uri.get(5..))
    else {
        return false;
    };
    data_uri_payload(rest).is_some_and(|payload| payload == html)
}

/// Decode the payload of a `data:` URI (without the scheme).
fn data_uri_payload(rest: &str) -> Option<String> {
    let (meta, data) = rest.split_once(',')?;
    let is_base64 = meta
        .rsplit(';')
        .next()
        .is_some_and(|param| param.eq_ignore_ascii_case("base64"));
    let decoded = urlencoding::decode(data).ok()?;
    if is_base64 {
        let bytes = STANDARD.decode(decoded.as_bytes()).ok()?;
        return String::from_utf8(bytes).ok();
    }
    Some(decoded.into_owned())
}
