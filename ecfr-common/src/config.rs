//! Service configuration loading
//!
//! Every setting is resolved independently, highest priority first:
//! 1. Command-line argument
//! 2. Environment variable (`ECFR_DATA_FILE`, `ECFR_HOST`, `ECFR_PORT`, `ECFR_LOG_LEVEL`)
//! 3. TOML config file
//! 4. Compiled default
//!
//! The config file is the one named on the command line or in `ECFR_CONFIG`,
//! otherwise `<config dir>/ecfr/config.toml` if it exists. A missing default
//! config file is not an error.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{Error, Result};

pub const DEFAULT_DATA_FILE: &str = "data/ecfr_chunks_all_titles.csv";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_LOG_LEVEL: &str = "info";

pub const ENV_CONFIG: &str = "ECFR_CONFIG";
pub const ENV_DATA_FILE: &str = "ECFR_DATA_FILE";
pub const ENV_HOST: &str = "ECFR_HOST";
pub const ENV_PORT: &str = "ECFR_PORT";
pub const ENV_LOG_LEVEL: &str = "ECFR_LOG_LEVEL";

/// Contents of the TOML config file; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    /// Path to the input table (CSV or JSON Lines)
    pub data_file: Option<PathBuf>,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// tracing filter directive, e.g. `info` or `ecfr_api=debug`
    pub level: Option<String>,
}

/// Values supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub config_file: Option<PathBuf>,
    pub data_file: Option<PathBuf>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub log_level: Option<String>,
}

/// Fully resolved service settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub data_file: PathBuf,
    pub host: String,
    pub port: u16,
    pub log_level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl ServiceConfig {
    /// Resolve settings from CLI, environment, config file and defaults
    pub fn resolve(cli: CliOverrides) -> Result<Self> {
        let toml_config = match config_file_path(cli.config_file.as_deref()) {
            Some((path, required)) => {
                if path.exists() {
                    info!("Loading config file {}", path.display());
                    load_toml_config(&path)?
                } else if required {
                    return Err(Error::Config(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                } else {
                    debug!("No config file at {}; using defaults", path.display());
                    TomlConfig::default()
                }
            }
            None => TomlConfig::default(),
        };

        let defaults = ServiceConfig::default();

        let env_port = match env_var(ENV_PORT) {
            Some(raw) => Some(raw.parse::<u16>().map_err(|_| {
                Error::Config(format!("{} is not a valid port: {:?}", ENV_PORT, raw))
            })?),
            None => None,
        };

        Ok(Self {
            data_file: cli
                .data_file
                .or_else(|| env_var(ENV_DATA_FILE).map(PathBuf::from))
                .or(toml_config.data_file)
                .unwrap_or(defaults.data_file),
            host: cli
                .host
                .or_else(|| env_var(ENV_HOST))
                .or(toml_config.server.host)
                .unwrap_or(defaults.host),
            port: cli
                .port
                .or(env_port)
                .or(toml_config.server.port)
                .unwrap_or(defaults.port),
            log_level: cli
                .log_level
                .or_else(|| env_var(ENV_LOG_LEVEL))
                .or(toml_config.logging.level)
                .unwrap_or(defaults.log_level),
        })
    }

    /// `host:port` for binding the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Invalid config file {}: {}", path.display(), e)))
}

/// Platform default config path (`~/.config/ecfr/config.toml` on Linux)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("ecfr").join("config.toml"))
}

/// Which config file to read and whether its absence is an error
fn config_file_path(cli_path: Option<&Path>) -> Option<(PathBuf, bool)> {
    if let Some(path) = cli_path {
        return Some((path.to_path_buf(), true));
    }
    if let Some(path) = env_var(ENV_CONFIG) {
        return Some((PathBuf::from(path), true));
    }
    default_config_path().map(|p| (p, false))
}

/// Non-empty environment variable
fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
