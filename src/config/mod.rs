mod types;

pub use types::*;

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::scanner::normalize_extensions;

pub const CONFIG_DIR_NAME: &str = "movie-rename";
pub const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read configuration {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

/// Default configuration file location (`<config_dir>/movie-rename/config.toml`)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Load configuration.
///
/// An explicit path must exist. Without one, the default location is used when
/// present, and built-in defaults otherwise.
pub fn load_config(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    let path = match explicit {
        Some(path) if !path.is_file() => {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }
        Some(path) => Some(path.to_path_buf()),
        None => default_config_path().filter(|p| p.is_file()),
    };

    let config = match path {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            let contents = fs::read_to_string(&path).map_err(|source| ConfigError::ReadError {
                path: path.clone(),
                source,
            })?;
            load_config_from_str(&contents)?
        }
        None => {
            debug!("No configuration file, using defaults");
            finalize(Config::default())?
        }
    };

    debug!(?config, "Configuration loaded");

    Ok(config)
}

/// Load configuration from a TOML string
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    let config: Config =
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    finalize(config)
}

fn finalize(mut config: Config) -> Result<Config, ConfigError> {
    config.movie_exts = normalize_extensions(&config.movie_exts);
    config.subtitles.exts = normalize_extensions(&config.subtitles.exts);
    validate_config(&config)?;
    Ok(config)
}

/// Validate configuration
///
/// The movie format and action are already checked during deserialization.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.movie_exts.is_empty() {
        return Err(ConfigError::ValidationError(
            "movie_exts cannot be empty".to_string(),
        ));
    }

    if config.subtitles.enabled && config.subtitles.exts.is_empty() {
        return Err(ConfigError::ValidationError(
            "subtitles.exts cannot be empty when subtitles are enabled".to_string(),
        ));
    }

    Ok(())
}
