//! # App Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     NEARBY_DB_PATH=/tmp/nearby.db                                      │
//! │     NEARBY_STORAGE_KEY=favorites                                       │
//! │     NEARBY_VIP_DISCOUNT=0.25                                           │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config PATH, or                                                  │
//! │     ~/.config/nearby/nearby.toml (Linux)                               │
//! │     ~/Library/Application Support/com.nearby.app/nearby.toml (macOS)   │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [storage]
//! database_path = "/home/me/.local/share/nearby/nearby.db"
//! storage_key = "favorites"
//!
//! [pricing]
//! default_vip_discount = 0.2
//! rounding = "half_away_from_zero"  # or "half_even"
//!
//! [display]
//! currency_symbol = "Rs"
//! ```

use nearby_core::money::CURRENCY_SYMBOL;
use nearby_core::validation::validate_discount_fraction;
use nearby_core::{RoundingMode, FAVORITES_STORAGE_KEY};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to write config file: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("No config path available on this platform")]
    NoConfigPath,

    #[error("Config file already exists: {} (use --force to overwrite)", .0.display())]
    AlreadyExists(PathBuf),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Sections
// =============================================================================

/// Where favorites are kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// SQLite file. `None` means the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,

    /// Key the favorites blob lives under.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
}

fn default_storage_key() -> String {
    FAVORITES_STORAGE_KEY.to_string()
}

impl Default for StorageSettings {
    fn default() -> Self {
        StorageSettings {
            database_path: None,
            storage_key: default_storage_key(),
        }
    }
}

/// Pricing defaults for `quote`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingSettings {
    /// VIP discount used when `--discount` is not given.
    #[serde(default = "default_vip_discount")]
    pub default_vip_discount: f64,

    #[serde(default)]
    pub rounding: RoundingMode,
}

fn default_vip_discount() -> f64 {
    0.2
}

impl Default for PricingSettings {
    fn default() -> Self {
        PricingSettings {
            default_vip_discount: default_vip_discount(),
            rounding: RoundingMode::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplaySettings {
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_currency_symbol() -> String {
    CURRENCY_SYMBOL.to_string()
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            currency_symbol: default_currency_symbol(),
        }
    }
}

// =============================================================================
// App Config
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub pricing: PricingSettings,

    #[serde(default)]
    pub display: DisplaySettings,
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (nearby.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = match config_path.or_else(Self::default_config_path) {
            Some(path) if path.exists() => {
                info!(?path, "Loading config from file");
                Self::from_file(&path)?
            }
            Some(path) => {
                debug!(?path, "Config file not found, using defaults");
                Self::default()
            }
            None => Self::default(),
        };

        config.apply_overrides(|name| std::env::var(name).ok());
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns defaults if anything goes wrong.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses a TOML file. No env overrides, no validation.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Saves configuration to file, creating parent directories.
    pub fn save(&self, config_path: Option<PathBuf>) -> ConfigResult<PathBuf> {
        let path = Self::resolve_path(config_path)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&path, toml::to_string_pretty(self)?)?;

        info!(?path, "Config saved");
        Ok(path)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.storage.storage_key.trim().is_empty() {
            return Err(ConfigError::Invalid("storage_key must not be empty".into()));
        }

        validate_discount_fraction(self.pricing.default_vip_discount)
            .map_err(|e| ConfigError::Invalid(format!("default_vip_discount: {}", e)))?;

        Ok(())
    }

    /// Applies `NEARBY_*` overrides looked up through `lookup`.
    ///
    /// Unparseable values are ignored with a warning.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup("NEARBY_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.storage.database_path = Some(PathBuf::from(path));
        }

        if let Some(key) = lookup("NEARBY_STORAGE_KEY") {
            self.storage.storage_key = key;
        }

        if let Some(discount) = lookup("NEARBY_VIP_DISCOUNT") {
            match discount.parse::<f64>() {
                Ok(d) => self.pricing.default_vip_discount = d,
                Err(_) => warn!(value = %discount, "Ignoring unparseable NEARBY_VIP_DISCOUNT"),
            }
        }
    }

    /// The file `load` and `save` use: `explicit`, else the platform default.
    pub fn resolve_path(explicit: Option<PathBuf>) -> ConfigResult<PathBuf> {
        explicit
            .or_else(Self::default_config_path)
            .ok_or(ConfigError::NoConfigPath)
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "nearby", "app")
            .map(|dirs| dirs.config_dir().join("nearby.toml"))
    }

    /// Database file to open: the configured path or the platform data dir.
    pub fn database_path(&self) -> Option<PathBuf> {
        self.storage.database_path.clone().or_else(|| {
            directories::ProjectDirs::from("com", "nearby", "app")
                .map(|dirs| dirs.data_dir().join("nearby.db"))
        })
    }
}
