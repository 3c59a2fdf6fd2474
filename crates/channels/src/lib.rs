//! Channel registry: the ordered list of named stream endpoints, its
//! validation rules, and its persistence through a key-value store.
//!
//! Mutations are synchronous against the in-memory list; every successful
//! mutation queues a full snapshot write that the caller never awaits.

pub mod channel;
pub mod defaults;
pub mod error;
pub mod persistence;
pub mod registry;
pub mod snapshot;
pub mod validate;

pub use {
    channel::{Channel, ChannelId},
    error::{Error, Result},
    persistence::{Loaded, PersistenceGateway},
    registry::{BootstrapSource, ChannelRegistry},
    snapshot::ChannelRecord,
    validate::{Field, ValidationError},
};
