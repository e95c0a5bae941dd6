//! # Server Configuration
//!
//! Configuration for the invoice API server.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     INVOICE_BIND_ADDR=127.0.0.1                                        │
//! │     INVOICE_PORT=9000                                                  │
//! │     INVOICE_DB_PATH=./invoices.db                                      │
//! │     INVOICE_CGST_BPS=900   INVOICE_IGST_BPS=900                        │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <path>, or                                                │
//! │     ~/.config/invoice/invoice-api.toml (Linux)                         │
//! │     ~/Library/Application Support/com.invoice.invoice/... (macOS)     │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     0.0.0.0:8080, 9% CGST + 9% IGST                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # invoice-api.toml
//! [server]
//! bind_addr = "0.0.0.0"
//! port = 8080
//!
//! [database]
//! path = "/var/lib/invoice/invoices.db"
//!
//! [tax]
//! cgst_bps = 900   # 9%
//! igst_bps = 900   # 9%
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

use invoice_core::validation::validate_tax_rate_bps;
use invoice_core::{TaxPolicy, TaxRate, ValidationError, DEFAULT_CGST_BPS, DEFAULT_IGST_BPS};

/// Config file name inside the platform config directory.
const CONFIG_FILE_NAME: &str = "invoice-api.toml";

/// Database file name inside the platform data directory.
const DB_FILE_NAME: &str = "invoices.db";

// =============================================================================
// Errors
// =============================================================================

/// Failures while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] ValidationError),

    #[error("Could not determine a data directory; set INVOICE_DB_PATH")]
    NoDataDir,
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Sections
// =============================================================================

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Bind address (default: 0.0.0.0 for all interfaces).
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerSettings {
    fn default() -> Self {
        ServerSettings {
            bind_addr: default_bind_addr(),
            port: default_port(),
        }
    }
}

impl ServerSettings {
    /// Returns the full bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

/// Where the invoice store lives.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// SQLite file. `None` means the platform data directory.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// The two tax components, in basis points.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TaxSettings {
    #[serde(default = "default_cgst_bps")]
    pub cgst_bps: u32,

    #[serde(default = "default_igst_bps")]
    pub igst_bps: u32,
}

fn default_cgst_bps() -> u32 {
    DEFAULT_CGST_BPS
}

fn default_igst_bps() -> u32 {
    DEFAULT_IGST_BPS
}

impl Default for TaxSettings {
    fn default() -> Self {
        TaxSettings {
            cgst_bps: default_cgst_bps(),
            igst_bps: default_igst_bps(),
        }
    }
}

impl TaxSettings {
    /// The policy the pricing engine is run with.
    pub fn policy(&self) -> TaxPolicy {
        TaxPolicy::new(
            TaxRate::from_bps(self.cgst_bps),
            TaxRate::from_bps(self.igst_bps),
        )
    }
}

// =============================================================================
// ApiConfig
// =============================================================================

/// Complete server configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub database: DatabaseSettings,

    #[serde(default)]
    pub tax: TaxSettings,
}

impl ApiConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (explicit path, else the platform config dir)
    /// 3. Environment variables
    ///
    /// An explicit `config_path` must exist; a missing platform default
    /// file just means defaults.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = match config_path {
            Some(path) => Self::from_file(&path)?,
            None => match Self::default_config_path().filter(|path| path.exists()) {
                Some(path) => Self::from_file(&path)?,
                None => {
                    debug!("No config file found, using defaults");
                    Self::default()
                }
            },
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Reads and parses a TOML file.
    fn from_file(path: &Path) -> ConfigResult<Self> {
        info!(path = %path.display(), "Loading config from file");
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parses a TOML document. Missing sections take their defaults.
    pub fn from_toml(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        validate_tax_rate_bps(self.tax.cgst_bps).map_err(|e| rename_field(e, "cgst_bps"))?;
        validate_tax_rate_bps(self.tax.igst_bps).map_err(|e| rename_field(e, "igst_bps"))?;
        Ok(())
    }

    /// The tax policy to price drafts with.
    pub fn tax_policy(&self) -> TaxPolicy {
        self.tax.policy()
    }

    /// Resolves the database file: configured path, else the platform data
    /// directory (created if missing).
    pub fn database_path(&self) -> ConfigResult<PathBuf> {
        if let Some(path) = &self.database.path {
            return Ok(path.clone());
        }

        let dirs = Self::project_dirs().ok_or(ConfigError::NoDataDir)?;
        let data_dir = dirs.data_dir();
        std::fs::create_dir_all(data_dir)?;

        Ok(data_dir.join(DB_FILE_NAME))
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from `lookup` (the environment, or a map in tests).
    /// Unparseable numbers are ignored with a warning.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(addr) = lookup("INVOICE_BIND_ADDR") {
            debug!(bind_addr = %addr, "Overriding bind address from environment");
            self.server.bind_addr = addr;
        }

        if let Some(port) = lookup("INVOICE_PORT") {
            match port.parse::<u16>() {
                Ok(p) => self.server.port = p,
                Err(_) => warn!(port = %port, "Ignoring invalid INVOICE_PORT"),
            }
        }

        if let Some(path) = lookup("INVOICE_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.database.path = Some(PathBuf::from(path));
        }

        if let Some(bps) = lookup("INVOICE_CGST_BPS") {
            match bps.parse::<u32>() {
                Ok(v) => self.tax.cgst_bps = v,
                Err(_) => warn!(value = %bps, "Ignoring invalid INVOICE_CGST_BPS"),
            }
        }

        if let Some(bps) = lookup("INVOICE_IGST_BPS") {
            match bps.parse::<u32>() {
                Ok(v) => self.tax.igst_bps = v,
                Err(_) => warn!(value = %bps, "Ignoring invalid INVOICE_IGST_BPS"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    fn project_dirs() -> Option<directories::ProjectDirs> {
        directories::ProjectDirs::from("com", "invoice", "invoice")
    }
}

/// Points a tax-rate validation error at the offending setting.
fn rename_field(err: ValidationError, field: &str) -> ConfigError {
    let err = match err {
        ValidationError::OutOfRange { min, max, .. } => ValidationError::OutOfRange {
            field: format!("tax.{field}"),
            min,
            max,
        },
        other => other,
    };
    ConfigError::Invalid(err)
}
