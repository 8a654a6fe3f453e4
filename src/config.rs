//! Settings management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/orchard/orchard.toml`
//! 3. Explicit config: the file passed with `--config`
//! 4. Environment variables: `ORCHARD_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::errors::TreeResult;
use crate::generator::TreeGenerator;
use crate::traversal::Order;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("environment override: {0}")]
    Env(#[from] ConfigError),

    #[error("invalid setting '{key}': {reason}")]
    Invalid { key: String, reason: String },

    #[error("serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Effective settings for tree generation and walking.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Number of nodes in a generated tree
    pub size: usize,
    /// Probability that a new node becomes the attachment point for the next one
    pub branch_chance: f64,
    /// Fixed RNG seed for reproducible trees
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Default order for `walk`
    pub order: Order,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            size: 32,
            branch_chance: 0.3,
            seed: None,
            order: Order::DepthFirst,
        }
    }
}

/// Raw settings for intermediate parsing; `None` means "not specified, inherit".
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct RawSettings {
    pub size: Option<usize>,
    pub branch_chance: Option<f64>,
    pub seed: Option<u64>,
    pub order: Option<Order>,
}

/// Get the XDG config directory for orchard.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "orchard").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("orchard.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, SettingsError> {
    let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|e| SettingsError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Treats a missing key as "not set" and passes every other error on.
fn optional<T>(result: Result<T, ConfigError>) -> Result<Option<T>, SettingsError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

impl Settings {
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            size: overlay.size.unwrap_or(self.size),
            branch_chance: overlay.branch_chance.unwrap_or(self.branch_chance),
            seed: overlay.seed.or(self.seed),
            order: overlay.order.unwrap_or(self.order),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// `explicit` is the file named on the command line; unlike the global
    /// file it must exist.
    pub fn load(explicit: Option<&Path>) -> Result<Self, SettingsError> {
        Self::load_layers(global_config_path().as_deref(), explicit)
    }

    /// Same as [`Settings::load`] with the global file location given.
    pub fn load_layers(
        global: Option<&Path>,
        explicit: Option<&Path>,
    ) -> Result<Self, SettingsError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config, skipped when absent
        if let Some(global_path) = global {
            if global_path.exists() {
                debug!("loading global settings from {}", global_path.display());
                current = current.merge_with(&load_raw_settings(global_path)?);
            }
        }

        // 3. Explicit config
        if let Some(path) = explicit {
            debug!("loading settings from {}", path.display());
            current = current.merge_with(&load_raw_settings(path)?);
        }

        // 4. Environment variables
        current = Self::apply_env_overrides(current)?;

        current.validate()?;
        Ok(current)
    }

    /// Apply ORCHARD_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, SettingsError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("ORCHARD")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        if let Some(val) = optional(config.get::<usize>("size"))? {
            settings.size = val;
        }
        if let Some(val) = optional(config.get::<f64>("branch_chance"))? {
            settings.branch_chance = val;
        }
        if let Some(val) = optional(config.get::<u64>("seed"))? {
            settings.seed = Some(val);
        }
        if let Some(val) = optional(config.get_string("order"))? {
            settings.order = val
                .parse()
                .map_err(|e: crate::errors::TreeError| SettingsError::Invalid {
                    key: "order".into(),
                    reason: e.to_string(),
                })?;
        }

        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.size == 0 {
            return Err(SettingsError::Invalid {
                key: "size".into(),
                reason: "must be at least 1".into(),
            });
        }
        if !(0.0..=1.0).contains(&self.branch_chance) {
            return Err(SettingsError::Invalid {
                key: "branch_chance".into(),
                reason: format!("{} is outside [0, 1]", self.branch_chance),
            });
        }
        Ok(())
    }

    /// Generator configured from these settings.
    pub fn generator(&self) -> TreeResult<TreeGenerator> {
        TreeGenerator::new(self.size, self.branch_chance)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, SettingsError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# orchard configuration
#
# Locations (by precedence, lowest to highest):
#   Global:   ~/.config/orchard/orchard.toml
#   Explicit: orchard --config <file>
#   Env:      ORCHARD_* environment variables (e.g. ORCHARD_SIZE=100)

# Number of nodes in a generated tree
# size = 32

# Chance (0.0 - 1.0) that a new node becomes the parent of the next one.
# 0.0 gives a flat tree, 1.0 a single chain.
# branch_chance = 0.3

# Fixed seed for reproducible trees (random when unset)
# seed = 42

# Walk order: "depth-first" or "breadth-first"
# order = "depth-first"
"#
        .to_string()
    }
}
