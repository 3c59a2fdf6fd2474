//! Personal live-stream channel manager.
//!
//! [`Tuner`] ties together the channel registry (`tuner-channels`), the key
//! value store it persists to (`tuner-store`), and the selection and player
//! binding (`tuner-player`). The host supplies a [`PlayerSurface`] that plays
//! the rendered document and forwards its callbacks back to the `Tuner`.

pub mod error;
pub mod events;
pub mod options;
pub mod store;
pub mod telemetry;
pub mod tuner;

pub use {
    error::{Error, Result},
    events::TunerEvent,
    options::TunerOptions,
    store::open_store,
    tuner::Tuner,
    tuner_channels::{BootstrapSource, Channel, ChannelId, ValidationError},
    tuner_player::{
        ActivationToken, NavigationDecision, PlaybackState, PlayerSurface, RecoveryAction,
        RenderDirective, SurfaceError,
    },
};
