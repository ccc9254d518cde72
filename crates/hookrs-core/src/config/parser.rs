// Hookrs Config Parser - TOML with Serde
// Loads hook options and binding lists

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::Deserialize;

use crate::binding::HandlerRef;
use crate::error::BindingError;
use crate::hook::{Hook, HookOptions, DEFAULT_QUEUE_CAPACITY};
use crate::kind::EventKind;

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("Invalid event kind: {0}")]
    InvalidKind(String),

    #[error("binding #{index}: {source}")]
    Binding {
        index: usize,
        #[source]
        source: BindingError,
    },
}

/// Root TOML table
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct ConfigToml {
    #[serde(default)]
    general: Option<GeneralConfig>,

    #[serde(default)]
    binding: Vec<BindingToml>,
}

/// General settings
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct GeneralConfig {
    /// Event queue capacity
    pub queue_capacity: Option<usize>,
    /// Default log filter for the CLI (e.g. "info", "debug")
    pub log_level: Option<String>,
}

/// Event kind as written in TOML: numeric tag or name
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum KindRepr {
    Tag(u8),
    Name(String),
}

impl KindRepr {
    fn resolve(&self) -> Result<EventKind, ConfigError> {
        let kind = match self {
            KindRepr::Tag(tag) => EventKind::from_u8(*tag),
            KindRepr::Name(name) => EventKind::parse(name),
        };
        kind.ok_or_else(|| {
            ConfigError::InvalidKind(match self {
                KindRepr::Tag(tag) => tag.to_string(),
                KindRepr::Name(name) => name.clone(),
            })
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct BindingToml {
    kind: KindRepr,
    keys: Vec<String>,
    #[serde(default)]
    label: Option<String>,
}

/// One binding from the file, kind already resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingEntry {
    pub kind: EventKind,
    pub keys: Vec<String>,
    /// Free-form name shown by front-ends
    pub label: Option<String>,
}

impl BindingEntry {
    /// Label, or the keys joined with '+'
    pub fn display_name(&self) -> String {
        match &self.label {
            Some(label) => label.clone(),
            None => self.keys.join("+"),
        }
    }
}

/// Outcome of [`Config::register_all`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegisterSummary {
    pub registered: usize,
    /// Bindings dropped because a name did not resolve
    pub skipped: usize,
}

/// Parsed binding file
#[derive(Debug, Clone, Default)]
pub struct Config {
    general: GeneralConfig,
    bindings: Vec<BindingEntry>,
    source_path: Option<PathBuf>,
}

impl Config {
    /// Parse configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let raw: ConfigToml =
            toml::from_str(content).map_err(|e| ConfigError::TomlParse(e.to_string()))?;

        let bindings = raw
            .binding
            .into_iter()
            .map(|b| {
                Ok(BindingEntry {
                    kind: b.kind.resolve()?,
                    keys: b.keys,
                    label: b.label,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        debug!("parsed {} binding(s)", bindings.len());
        Ok(Self {
            general: raw.general.unwrap_or_default(),
            bindings,
            source_path: None,
        })
    }

    /// Config holding only the given bindings
    pub fn from_entries(bindings: Vec<BindingEntry>) -> Self {
        Self {
            bindings,
            ..Self::default()
        }
    }

    /// Load configuration from a TOML file
    pub fn from_toml_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(&path)?;
        let mut config = Self::from_toml_str(&content)?;
        config.source_path = Some(path.as_ref().to_path_buf());
        Ok(config)
    }

    /// Get the default config path (~/.config/hookrs/bindings.toml)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("hookrs").join("bindings.toml"))
    }

    /// Load from the default location, or an empty config if there is none
    pub fn load_default() -> Result<Self, ConfigError> {
        if let Some(path) = Self::default_path() {
            if path.exists() {
                return Self::from_toml_path(path);
            }
        }
        Ok(Self::default())
    }

    /// File this config was read from, if any
    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    pub fn general(&self) -> &GeneralConfig {
        &self.general
    }

    pub fn log_level(&self) -> Option<&str> {
        self.general.log_level.as_deref()
    }

    /// Hook options described by `[general]`
    pub fn options(&self) -> HookOptions {
        HookOptions {
            queue_capacity: self
                .general
                .queue_capacity
                .unwrap_or(DEFAULT_QUEUE_CAPACITY),
        }
    }

    pub fn bindings(&self) -> &[BindingEntry] {
        &self.bindings
    }

    /// Register every binding on `hook`, asking `factory` for each handler.
    ///
    /// Bindings with unknown names are skipped; any other binding error
    /// aborts with the index of the offending entry.
    pub fn register_all<F>(&self, hook: &Hook, mut factory: F) -> Result<RegisterSummary, ConfigError>
    where
        F: FnMut(&BindingEntry) -> HandlerRef,
    {
        let mut summary = RegisterSummary::default();
        for (index, entry) in self.bindings.iter().enumerate() {
            let names: Vec<&str> = entry.keys.iter().map(String::as_str).collect();
            match hook.register(entry.kind, &names, factory(entry)) {
                Ok(()) => summary.registered += 1,
                Err(e) if !e.is_fatal() => summary.skipped += 1,
                Err(source) => return Err(ConfigError::Binding { index, source }),
            }
        }
        info!(
            "registered {} binding(s), skipped {}",
            summary.registered, summary.skipped
        );
        Ok(summary)
    }
}
