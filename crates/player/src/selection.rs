//! Which channel is active, and whether the surface must rebuild for it.

use {
    tracing::debug,
    tuner_channels::{Channel, ChannelId},
};

use crate::{Error, Result, token::ActivationToken};

/// Result of a selection change, telling the binding what to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    /// The URL changed: tear the surface down and render this token.
    Rebuild(ActivationToken),
    /// The URL is the same as before: keep the current surface.
    Unchanged(ActivationToken),
    /// Nothing is selected any more.
    Cleared,
}

impl Activation {
    pub fn needs_rebuild(&self) -> bool {
        matches!(self, Self::Rebuild(_))
    }

    pub fn token(&self) -> Option<&ActivationToken> {
        match self {
            Self::Rebuild(token) | Self::Unchanged(token) => Some(token),
            Self::Cleared => None,
        }
    }
}

/// Tracks the selected channel and the token last handed to the surface.
///
/// The selection is held by value and matched against the list by
/// [`ChannelId`]; every reconcile method must be called with the list as it
/// is after the mutation.
#[derive(Debug, Default)]
pub struct SelectionController {
    selected: Option<Channel>,
    token: Option<ActivationToken>,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<&Channel> {
        self.selected.as_ref()
    }

    pub fn token(&self) -> Option<&ActivationToken> {
        self.token.as_ref()
    }

    pub fn is_selected(&self, id: ChannelId) -> bool {
        self.selected.as_ref().is_some_and(|c| c.id() == id)
    }

    /// Start over from a freshly loaded list: select its first element.
    ///
    /// The previous token is forgotten, so a non-empty list always yields
    /// [`Activation::Rebuild`].
    pub fn derive_after_load(&mut self, list: &[Channel]) -> Activation {
        self.token = None;
        self.set(list.first().cloned())
    }

    /// Select `channel`, which must be a member of `list`.
    pub fn select(&mut self, channel: &Channel, list: &[Channel]) -> Result<Activation> {
        if !list.iter().any(|c| c.id() == channel.id()) {
            return Err(Error::NotInList { id: channel.id() });
        }
        Ok(self.set(Some(channel.clone())))
    }

    /// After a removal: if the removed channel was selected, fall back to the
    /// first remaining channel (or nothing).
    pub fn reconcile_after_removal(
        &mut self,
        removed_was_selected: bool,
        list: &[Channel],
    ) -> Activation {
        if removed_was_selected {
            return self.set(list.first().cloned());
        }
        self.current()
    }

    /// After an edit: if the edited channel was selected, follow it to its
    /// replacement.
    pub fn reconcile_after_edit(&mut self, edited: ChannelId, replacement: &Channel) -> Activation {
        if self.is_selected(edited) {
            return self.set(Some(replacement.clone()));
        }
        self.current()
    }

    /// After an add: an empty selection picks up the new channel so a
    /// non-empty list never has nothing selected.
    pub fn reconcile_after_add(&mut self, added: &Channel) -> Activation {
        if self.selected.is_none() {
            return self.set(Some(added.clone()));
        }
        self.current()
    }

    fn current(&self) -> Activation {
        match &self.token {
            Some(token) => Activation::Unchanged(token.clone()),
            None => Activation::Cleared,
        }
    }

    fn set(&mut self, channel: Option<Channel>) -> Activation {
        let Some(channel) = channel else {
            self.selected = None;
            self.token = None;
            debug!("selection cleared");
            return Activation::Cleared;
        };

        let token = ActivationToken::for_url(channel.url());
        let rebuild = self.token.as_ref() != Some(&token);
        debug!(id = %channel.id(), name = %channel.name(), %token, rebuild, "channel selected");
        self.selected = Some(channel);
        self.token = Some(token.clone());

        if rebuild {
            Activation::Rebuild(token)
        } else {
            Activation::Unchanged(token)
        }
    }
}
