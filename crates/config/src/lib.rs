//! Configuration loading, validation, and env substitution.
//!
//! Config files: `tuner.toml`, `tuner.yaml`, or `tuner.json`
//! Searched in `./` then `~/.config/tuner/`.
//!
//! Supports `${ENV_VAR}` substitution in all string values.

pub mod env_subst;
pub mod loader;
pub mod schema;
pub mod template;
pub mod validate;

pub use {
    loader::{
        config_dir, data_dir, discover_and_load, find_or_default_config_path, load_config,
        save_config, write_default_config,
    },
    schema::{
        ChannelSeed, DefaultsConfig, PlayerConfig, StorageBackend, StorageConfig, TunerConfig,
    },
    validate::{
        Diagnostic, Severity, ValidationResult, validate_config, validate_file, validate_toml_str,
    },
};
