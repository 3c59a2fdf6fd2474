//! Playback selection and the binding to the embedded player surface.
//!
//! Flow: the selection controller decides which channel is active and emits
//! an [`Activation`] → the binding renders the inline player document for a
//! rebuild → the host surface loads it and reports created/error/navigation
//! events back.

pub mod binding;
pub mod error;
pub mod selection;
pub mod state;
pub mod surface;
pub mod template;
pub mod token;

pub use {
    binding::{NavigationDecision, PlaybackBinding, RecoveryAction, RenderDirective},
    error::{Error, Result},
    selection::{Activation, SelectionController},
    state::PlaybackState,
    surface::{PlayerSurface, SurfaceError},
    template::PlayerOptions,
    token::ActivationToken,
};
