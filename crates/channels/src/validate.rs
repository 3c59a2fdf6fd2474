//! Input validation for channel names and stream URLs.
//!
//! Only syntax is checked: a URL is accepted when it parses as an absolute
//! URL. Whether it points at a playable playlist is up to the player.

use std::fmt;

/// The user-editable channel fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Url,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name => write!(f, "name"),
            Self::Url => write!(f, "url"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("channel {0} must not be empty")]
    EmptyField(Field),

    #[error("invalid stream url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Validate user input and return the normalized `(name, url)` pair.
///
/// Surrounding whitespace is stripped from both fields. The URL text is kept
/// as entered (after trimming) rather than re-serialized, so what the user
/// typed is what gets persisted and played.
pub fn validate(name: &str, url: &str) -> Result<(String, String), ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyField(Field::Name));
    }

    let url = url.trim();
    if url.is_empty() {
        return Err(ValidationError::EmptyField(Field::Url));
    }

    // `Url::parse` has no base, so relative references fail here.
    url::Url::parse(url).map_err(|e| ValidationError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    Ok((name.to_string(), url.to_string()))
}
