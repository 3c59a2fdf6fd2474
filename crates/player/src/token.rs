use {
    sha2::{Digest, Sha256},
    std::fmt,
};

/// Change-detection value for the player surface.
///
/// Derived only from the stream URL: channels sharing a URL share a token, so
/// switching between them never tears the player down.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActivationToken(String);

impl ActivationToken {
    pub fn for_url(url: &str) -> Self {
        let digest = Sha256::digest(url.as_bytes());
        Self(digest.iter().map(|b| format!("{b:02x}")).collect())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActivationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Short form is enough for logs.
        f.write_str(&self.0[..12.min(self.0.len())])
    }
}
