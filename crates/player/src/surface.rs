use crate::binding::RenderDirective;

/// The embedded web view that actually plays video. Supplied by the host.
pub trait PlayerSurface: Send + Sync {
    /// Replace the current content with an inline document.
    fn load_document(&self, directive: &RenderDirective);

    /// Run a script inside the current document.
    fn execute_script(&self, script: &str);

    /// Tear down any content; nothing is selected.
    fn clear(&self);
}

/// Failures reported by the surface while loading or playing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SurfaceError {
    /// Generic load or network failure. The surface cannot tell a bad URL
    /// from a transient outage.
    #[error("surface load error {code}: {message} ({request_url})")]
    Load {
        code: i32,
        message: String,
        request_url: String,
    },

    /// An HTTP status error on a sub-request.
    #[error("surface http error {status} ({request_url})")]
    Http { status: u16, request_url: String },
}
