use std::sync::Arc;

use {
    tokio::sync::broadcast,
    tracing::{debug, info, warn},
    tuner_channels::{
        BootstrapSource, Channel, ChannelId, ChannelRegistry, PersistenceGateway,
    },
    tuner_config::TunerConfig,
    tuner_player::{
        Activation, ActivationToken, NavigationDecision, PlaybackBinding, PlaybackState,
        PlayerSurface, RecoveryAction, SelectionController, SurfaceError,
    },
    tuner_store::KeyValueStore,
};

use crate::{Error, Result, events::TunerEvent, options::TunerOptions, store::open_store};

const EVENT_CAPACITY: usize = 64;

/// What subscribers last saw, to decide which events a change produces.
struct Observed {
    selected: Option<ChannelId>,
    token: Option<ActivationToken>,
    state: PlaybackState,
}

/// Owns the channel list, the selection, and the player surface.
///
/// Every mutation goes through `&mut self`: the registry changes first, the
/// selection is reconciled against the new list, and only then is the
/// surface told to rebuild or clear.
pub struct Tuner {
    registry: ChannelRegistry,
    selection: SelectionController,
    binding: PlaybackBinding,
    surface: Box<dyn PlayerSurface>,
    events: broadcast::Sender<TunerEvent>,
}

impl std::fmt::Debug for Tuner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tuner")
            .field("registry", &self.registry)
            .field("selection", &self.selection)
            .field("binding", &self.binding)
            .finish_non_exhaustive()
    }
}

impl Tuner {
    /// Load the channel list, select its first channel, and render it.
    ///
    /// Must run inside a Tokio runtime. Never fails: an unusable store falls
    /// back to the default channels.
    pub async fn start(
        store: Arc<dyn KeyValueStore>,
        surface: Box<dyn PlayerSurface>,
        options: TunerOptions,
    ) -> Self {
        let gateway = PersistenceGateway::new(store, options.storage_key);
        let registry = match options.seeds {
            Some(seeds) => ChannelRegistry::new(gateway, seeds),
            None => ChannelRegistry::with_builtin_defaults(gateway),
        };
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        let mut tuner = Self {
            registry,
            selection: SelectionController::new(),
            binding: PlaybackBinding::new(options.player),
            surface,
            events,
        };
        tuner.reload().await;
        tuner
    }

    /// Open the configured store and start.
    pub async fn from_config(config: &TunerConfig, surface: Box<dyn PlayerSurface>) -> Result<Self> {
        let store = open_store(&config.storage).await?;
        Ok(Self::start(store, surface, TunerOptions::from(config)).await)
    }

    /// Re-read the channel list from the store and start over from its first
    /// channel. The surface is rebuilt even if the URL did not change.
    pub async fn reload(&mut self) {
        let before = self.observe();
        self.registry.bootstrap().await;
        let activation = self.selection.derive_after_load(self.registry.channels());
        self.apply(activation);
        self.publish(before, true);
    }

    pub fn add(&mut self, name: &str, url: &str) -> Result<Channel> {
        let before = self.observe();
        let channel = self.registry.add(name, url)?;
        let activation = self.selection.reconcile_after_add(&channel);
        self.apply(activation);
        self.publish(before, true);
        Ok(channel)
    }

    /// Replace `target` with a channel built from the input. A selected
    /// target stays selected through its replacement.
    pub fn edit(&mut self, target: ChannelId, name: &str, url: &str) -> Result<Channel> {
        let before = self.observe();
        let replacement = self.registry.edit(target, name, url)?;
        let activation = self.selection.reconcile_after_edit(target, &replacement);
        self.apply(activation);
        self.publish(before, true);
        Ok(replacement)
    }

    /// Remove `target`. Returns `false`, changing nothing, if it is not in
    /// the list.
    pub fn remove(&mut self, target: ChannelId) -> bool {
        let before = self.observe();
        let was_selected = self.selection.is_selected(target);
        if !self.registry.remove(target) {
            return false;
        }
        let activation = self
            .selection
            .reconcile_after_removal(was_selected, self.registry.channels());
        self.apply(activation);
        self.publish(before, true);
        true
    }

    pub fn select(&mut self, target: ChannelId) -> Result<()> {
        let before = self.observe();
        let channel = self
            .registry
            .get(target)
            .cloned()
            .ok_or(tuner_channels::Error::not_found(target))?;
        let activation = self.selection.select(&channel, self.registry.channels())?;
        self.apply(activation);
        self.publish(before, false);
        Ok(())
    }

    /// The surface finished creating the rendered document.
    pub fn on_surface_created(&mut self) {
        let before = self.observe();
        self.binding.on_created();
        self.publish(before, false);
    }

    /// Handle a failure reported by the surface. A load failure triggers a
    /// reload of the channel list.
    pub async fn on_surface_error(&mut self, error: SurfaceError) -> RecoveryAction {
        let before = self.observe();
        let action = self.binding.on_surface_error(&error);
        self.publish(before, false);
        if action == RecoveryAction::Reload {
            self.reload().await;
        }
        action
    }

    pub fn on_navigation_starting(&mut self, uri: &str) -> NavigationDecision {
        self.binding.guard_navigation(uri)
    }

    pub fn on_fullscreen_changed(&self, fullscreen: bool) {
        if let Some(script) = self.binding.fullscreen_script(fullscreen) {
            debug!(fullscreen, "re-laying out player");
            self.surface.execute_script(&script);
        }
    }

    pub fn channels(&self) -> &[Channel] {
        self.registry.channels()
    }

    pub fn selected(&self) -> Option<&Channel> {
        self.selection.selected()
    }

    pub fn token(&self) -> Option<&ActivationToken> {
        self.selection.token()
    }

    pub fn state(&self) -> PlaybackState {
        self.binding.state()
    }

    /// How the current list was obtained by the last load.
    pub fn source(&self) -> Option<BootstrapSource> {
        self.registry.source()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TunerEvent> {
        self.events.subscribe()
    }

    /// Wait until every queued save has reached the store.
    pub async fn flush(&self) {
        self.registry.flush().await;
    }

    fn apply(&mut self, activation: Activation) {
        match activation {
            Activation::Rebuild(token) => {
                let Some(channel) = self.selection.selected() else {
                    return;
                };
                match self.binding.render(channel) {
                    Ok(directive) => {
                        info!(%token, name = %channel.name(), "loading channel");
                        self.surface.load_document(&directive);
                    },
                    Err(e) => {
                        warn!(%token, error = %e, "failed to render player document");
                        self.binding.on_render_failed();
                    },
                }
            },
            Activation::Unchanged(_) => {},
            Activation::Cleared => {
                if self.binding.rendered().is_some() || self.binding.state() != PlaybackState::Empty
                {
                    self.binding.clear();
                    self.surface.clear();
                }
            },
        }
    }

    fn observe(&self) -> Observed {
        Observed {
            selected: self.selection.selected().map(Channel::id),
            token: self.selection.token().cloned(),
            state: self.binding.state(),
        }
    }

    fn publish(&self, before: Observed, channels_changed: bool) {
        if channels_changed {
            self.emit(TunerEvent::ChannelsChanged {
                count: self.registry.len(),
            });
        }
        let after = self.observe();
        if after.selected != before.selected || after.token != before.token {
            self.emit(TunerEvent::SelectionChanged {
                id: after.selected.map(|id| id.to_string()),
                token: after.token.map(|t| t.as_str().to_string()),
            });
        }
        if after.state != before.state {
            self.emit(TunerEvent::PlaybackStateChanged { state: after.state });
        }
    }

    fn emit(&self, event: TunerEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }
}
