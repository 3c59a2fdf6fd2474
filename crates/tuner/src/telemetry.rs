//! Subscriber setup for hosts that embed the tuner.
//!
//! The library crates only emit `tracing` events; nothing is printed until the
//! host installs a subscriber, either its own or this one.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install a global subscriber at `level`. `RUST_LOG` overrides the level.
///
/// Fails if a global subscriber is already set.
pub fn init(level: &str, json: bool) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(fmt::layer().json().with_target(true).with_thread_ids(false))
            .try_init()?;
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_ansi(true),
            )
            .try_init()?;
    }
    Ok(())
}
