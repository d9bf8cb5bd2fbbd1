// Configuration loading and parsing (config/matchup.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::sport::Sport;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Config structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub client: ClientConfig,
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Backend origin without the sport prefix, e.g. "http://127.0.0.1:8080".
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    pub sport: Sport,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Quiet period after the last keystroke before a search fires.
    pub debounce_ms: u64,
    /// Queries shorter than this are a local no-op.
    pub min_query_len: usize,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

const CONFIG_FILE: &str = "matchup.toml";

/// Load and validate configuration from `config/matchup.toml` relative to
/// the given `base_dir`.
///
/// This is the lower-level loading primitive that does not auto-copy
/// defaults. Prefer `load_config()` which handles default initialization.
pub(crate) fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE);
    let text = std::fs::read_to_string(&path).map_err(|_| ConfigError::FileNotFound {
        path: path.clone(),
    })?;

    let config: Config = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        source: e,
    })?;

    validate(&config)?;
    Ok(config)
}

/// Ensure `config/matchup.toml` exists by copying it from `defaults/` when
/// missing. Existing files are never overwritten.
pub fn ensure_config_files(base_dir: &Path) -> Result<(), ConfigError> {
    let default_path = base_dir.join("defaults").join(CONFIG_FILE);
    let config_dir = base_dir.join("config");
    let target = config_dir.join(CONFIG_FILE);

    if target.exists() {
        return Ok(());
    }
    if !default_path.exists() {
        return Err(ConfigError::DefaultsCopyError {
            message: format!(
                "neither {} nor defaults/{CONFIG_FILE} found in {}; \
                 run from the project root or create the config file",
                target.display(),
                base_dir.display()
            ),
        });
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;
    std::fs::copy(&default_path, &target).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to copy {}: {e}", default_path.display()),
    })?;
    Ok(())
}

/// Convenience wrapper: load config from the working directory, falling back
/// to the per-user config directory (e.g. ~/.config/matchup) when the
/// working directory has neither a config nor defaults to copy.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;

    match ensure_config_files(&cwd) {
        Ok(()) => load_config_from(&cwd),
        Err(copy_err) => {
            if let Some(dirs) = directories::ProjectDirs::from("", "", "matchup") {
                let user_path = dirs.config_dir().join(CONFIG_FILE);
                if user_path.exists() {
                    let text = std::fs::read_to_string(&user_path).map_err(|_| {
                        ConfigError::FileNotFound {
                            path: user_path.clone(),
                        }
                    })?;
                    let config: Config =
                        toml::from_str(&text).map_err(|e| ConfigError::ParseError {
                            path: user_path,
                            source: e,
                        })?;
                    validate(&config)?;
                    return Ok(config);
                }
            }
            Err(copy_err)
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let url = config.server.base_url.trim();
    if url.is_empty() {
        return Err(ConfigError::ValidationError {
            field: "server.base_url".into(),
            message: "must not be empty".into(),
        });
    }
    if url.ends_with('/') {
        return Err(ConfigError::ValidationError {
            field: "server.base_url".into(),
            message: "must not end with a slash (the API prefix is appended)".into(),
        });
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::ValidationError {
            field: "server.base_url".into(),
            message: format!("must start with http:// or https://, got `{url}`"),
        });
    }

    if config.client.request_timeout_secs == 0 {
        return Err(ConfigError::ValidationError {
            field: "client.request_timeout_secs".into(),
            message: "must be greater than 0".into(),
        });
    }

    if config.search.debounce_ms == 0 {
        return Err(ConfigError::ValidationError {
            field: "search.debounce_ms".into(),
            message: "must be greater than 0".into(),
        });
    }
    if config.search.min_query_len == 0 {
        return Err(ConfigError::ValidationError {
            field: "search.min_query_len".into(),
            message: "must be at least 1".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
