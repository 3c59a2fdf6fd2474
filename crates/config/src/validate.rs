//! Configuration validation engine.
//!
//! Validates TOML configuration against the known schema, detects
//! unknown/misspelled fields, and checks values the loader would accept but
//! the tuner cannot use.

use std::{collections::HashMap, path::Path};

use crate::schema::{StorageBackend, TunerConfig};

/// Severity level for a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
            Self::Info => write!(f, "info"),
        }
    }
}

/// A single validation diagnostic.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Category: "syntax", "unknown-field", "type-error", "storage",
    /// "channel", "security", "defaults"
    pub category: &'static str,
    /// Dotted path, e.g. "storage.key"
    pub path: String,
    pub message: String,
}

impl Diagnostic {
    fn new(
        severity: Severity,
        category: &'static str,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            category,
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Result of validating a configuration file.
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub diagnostics: Vec<Diagnostic>,
    pub config_path: Option<std::path::PathBuf>,
}

impl ValidationResult {
    /// Returns `true` if any diagnostic is an error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Count diagnostics by severity.
    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }
}

// ── Schema tree for unknown-field detection ─────────────────────────────────

/// Expected shape of the configuration.
enum KnownKeys {
    Struct(HashMap<&'static str, KnownKeys>),
    Array(Box<KnownKeys>),
    Leaf,
}

fn build_schema_map() -> KnownKeys {
    use KnownKeys::{Array, Leaf, Struct};

    Struct(HashMap::from([
        (
            "storage",
            Struct(HashMap::from([
                ("backend", Leaf),
                ("path", Leaf),
                ("key", Leaf),
            ])),
        ),
        (
            "player",
            Struct(HashMap::from([
                ("hls_script_url", Leaf),
                ("autoplay", Leaf),
                ("muted", Leaf),
                ("background", Leaf),
            ])),
        ),
        (
            "defaults",
            Struct(HashMap::from([(
                "channels",
                Array(Box::new(Struct(HashMap::from([
                    ("name", Leaf),
                    ("url", Leaf),
                ])))),
            )])),
        ),
    ]))
}

fn check_unknown_fields(
    value: &toml::Value,
    schema: &KnownKeys,
    path: &str,
    out: &mut Vec<Diagnostic>,
) {
    match (value, schema) {
        (toml::Value::Table(table), KnownKeys::Struct(fields)) => {
            for (key, child) in table {
                let child_path = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{path}.{key}")
                };
                match fields.get(key.as_str()) {
                    Some(child_schema) => {
                        check_unknown_fields(child, child_schema, &child_path, out)
                    },
                    None => out.push(Diagnostic::new(
                        Severity::Warning,
                        "unknown-field",
                        child_path,
                        format!("unknown field `{key}`"),
                    )),
                }
            }
        },
        (toml::Value::Array(items), KnownKeys::Array(item_schema)) => {
            for (i, item) in items.iter().enumerate() {
                check_unknown_fields(item, item_schema, &format!("{path}[{i}]"), out);
            }
        },
        _ => {},
    }
}

// ── Semantic checks ─────────────────────────────────────────────────────────

/// Check a parsed config for values the tuner cannot use.
pub fn validate_config(config: &TunerConfig) -> Vec<Diagnostic> {
    let mut out = Vec::new();

    if config.storage.key.trim().is_empty() {
        out.push(Diagnostic::new(
            Severity::Error,
            "storage",
            "storage.key",
            "storage key must not be empty",
        ));
    }

    match (config.storage.backend, &config.storage.path) {
        (StorageBackend::Memory, Some(_)) => out.push(Diagnostic::new(
            Severity::Info,
            "storage",
            "storage.path",
            "path is ignored by the memory backend",
        )),
        (_, Some(path)) if path.is_dir() => out.push(Diagnostic::new(
            Severity::Error,
            "storage",
            "storage.path",
            format!("{} is a directory", path.display()),
        )),
        _ => {},
    }

    match url::Url::parse(&config.player.hls_script_url) {
        Ok(url) if url.scheme() == "https" => {},
        Ok(url) => out.push(Diagnostic::new(
            Severity::Warning,
            "security",
            "player.hls_script_url",
            format!("player script is loaded over {}", url.scheme()),
        )),
        Err(e) => out.push(Diagnostic::new(
            Severity::Error,
            "player",
            "player.hls_script_url",
            format!("invalid url: {e}"),
        )),
    }

    if let Some(channels) = &config.defaults.channels {
        if channels.is_empty() {
            out.push(Diagnostic::new(
                Severity::Info,
                "defaults",
                "defaults.channels",
                "empty default list: first run starts with no channels",
            ));
        }
        for (i, seed) in channels.iter().enumerate() {
            let path = format!("defaults.channels[{i}]");
            if seed.name.trim().is_empty() {
                out.push(Diagnostic::new(
                    Severity::Error,
                    "channel",
                    format!("{path}.name"),
                    "channel name must not be empty",
                ));
            }
            if let Err(e) = url::Url::parse(seed.url.trim()) {
                out.push(Diagnostic::new(
                    Severity::Error,
                    "channel",
                    format!("{path}.url"),
                    format!("invalid stream url {:?}: {e}", seed.url),
                ));
            }
        }
    }

    out
}

/// Validate a TOML string: syntax, unknown fields, types, then semantics.
pub fn validate_toml_str(raw: &str) -> ValidationResult {
    let mut result = ValidationResult::default();

    let value: toml::Value = match toml::from_str(raw) {
        Ok(v) => v,
        Err(e) => {
            result.diagnostics.push(Diagnostic::new(
                Severity::Error,
                "syntax",
                "",
                e.to_string(),
            ));
            return result;
        },
    };

    check_unknown_fields(&value, &build_schema_map(), "", &mut result.diagnostics);

    match value.try_into::<TunerConfig>() {
        Ok(config) => result.diagnostics.extend(validate_config(&config)),
        Err(e) => result.diagnostics.push(Diagnostic::new(
            Severity::Error,
            "type-error",
            "",
            e.to_string(),
        )),
    }

    result
}

/// Validate a TOML config file on disk.
pub fn validate_file(path: &Path) -> ValidationResult {
    let mut result = match std::fs::read_to_string(path) {
        Ok(raw) => validate_toml_str(&crate::env_subst::substitute_env(&raw)),
        Err(e) => ValidationResult {
            diagnostics: vec![Diagnostic::new(
                Severity::Error,
                "syntax",
                "",
                format!("failed to read {}: {e}", path.display()),
            )],
            config_path: None,
        },
    };
    result.config_path = Some(path.to_path_buf());
    result
}
