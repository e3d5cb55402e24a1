//! Configuration for papercast-docs
//!
//! Settings are resolved in layers: built-in defaults, an optional JSON
//! config file (`~/.papercast/docs.json` unless a path is given), then
//! `PAPERCAST_DOCS_*` environment variables. Command-line flags are applied
//! last by the binary.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{DocsError, Result};
use crate::plugins::{ParseMode, DEFAULT_REGISTRY_URL, DEFAULT_TIMEOUT_SECS};

const ENV_REGISTRY_URL: &str = "PAPERCAST_DOCS_REGISTRY_URL";
const ENV_TIMEOUT_SECS: &str = "PAPERCAST_DOCS_TIMEOUT_SECS";
const ENV_NO_CACHE: &str = "PAPERCAST_DOCS_NO_CACHE";
const ENV_PARSE_MODE: &str = "PAPERCAST_DOCS_PARSE_MODE";

/// Which card layout and slot set a page uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// One card per plugin, placed by the plugin's `type`.
    #[default]
    Plugins,
    /// One card per contribution, placed by the contribution key.
    Contributions,
}

/// Slot ids for the plugin page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginSlotIds {
    pub processors: String,
    pub collectors: String,
    pub publishers: String,
}

impl Default for PluginSlotIds {
    fn default() -> Self {
        Self {
            processors: "plugins-container-processors".to_string(),
            collectors: "plugins-container-collectors".to_string(),
            publishers: "plugins-container-publishers".to_string(),
        }
    }
}

/// Slot ids for the contribution page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContributionSlotIds {
    pub processors: String,
    pub subscribers: String,
    pub publishers: String,
    pub types: String,
}

impl Default for ContributionSlotIds {
    fn default() -> Self {
        Self {
            processors: "contrib-container-processors".to_string(),
            subscribers: "contrib-container-subscribers".to_string(),
            publishers: "contrib-container-publishers".to_string(),
            types: "contrib-container-types".to_string(),
        }
    }
}

/// Resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocsConfig {
    /// Registry URL fetched when no local file is given.
    pub registry_url: String,
    /// HTTP timeout in seconds.
    pub timeout_secs: u64,
    /// Ask caches to revalidate the registry.
    pub no_cache: bool,
    pub parse_mode: ParseMode,
    pub variant: Variant,
    pub plugin_slots: PluginSlotIds,
    pub contribution_slots: ContributionSlotIds,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            registry_url: DEFAULT_REGISTRY_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            no_cache: false,
            parse_mode: ParseMode::default(),
            variant: Variant::default(),
            plugin_slots: PluginSlotIds::default(),
            contribution_slots: ContributionSlotIds::default(),
        }
    }
}

impl DocsConfig {
    /// Directory holding user-level papercast settings (`~/.papercast`).
    pub fn dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".papercast")
    }

    /// Default config file path.
    pub fn path() -> PathBuf {
        Self::dir().join("docs.json")
    }

    /// Load configuration.
    ///
    /// An explicit `path` must exist. Without one, the default path is read
    /// when present and silently skipped otherwise. Environment overrides are
    /// applied on top.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => {
                let default_path = Self::path();
                if default_path.is_file() {
                    Self::from_file(&default_path)?
                } else {
                    debug!(path = %default_path.display(), "No config file, using defaults");
                    Self::default()
                }
            }
        };

        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Read a JSON config file; missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            DocsError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            DocsError::Config(format!("Invalid config file {}: {}", path.display(), e))
        })?;
        info!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    /// Apply `PAPERCAST_DOCS_*` overrides using `lookup` to read variables.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_REGISTRY_URL).filter(|v| !v.trim().is_empty()) {
            self.registry_url = url.trim().to_string();
        }

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            self.timeout_secs = raw.trim().parse().map_err(|_| {
                DocsError::Config(format!(
                    "{} must be a whole number of seconds, got '{}'",
                    ENV_TIMEOUT_SECS, raw
                ))
            })?;
        }

        if let Some(raw) = lookup(ENV_NO_CACHE) {
            self.no_cache = parse_bool(&raw).ok_or_else(|| {
                DocsError::Config(format!("{} must be true or false, got '{}'", ENV_NO_CACHE, raw))
            })?;
        }

        if let Some(raw) = lookup(ENV_PARSE_MODE) {
            self.parse_mode = match raw.trim().to_lowercase().as_str() {
                "strict" => ParseMode::Strict,
                "json5" => ParseMode::Json5,
                _ => {
                    return Err(DocsError::Config(format!(
                        "{} must be 'strict' or 'json5', got '{}'",
                        ENV_PARSE_MODE, raw
                    )))
                }
            };
        }

        self.validate()
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            return Err(DocsError::Config(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.registry_url.trim().is_empty() {
            return Err(DocsError::Config("registry_url is empty".to_string()));
        }
        Ok(())
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
