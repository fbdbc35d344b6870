//! Shared configuration for the questline CLI.
//!
//! TOML config with environment overrides, the player progress file,
//! and translation to `questline_core::QuestsConfig`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use questline_core::{DEFAULT_API_URL, GameMode, QuestsConfig, Settings};

/// Prefix for environment overrides (`QUESTLINE_LANGUAGE=de`).
pub const ENV_PREFIX: &str = "QUESTLINE_";

const CONFIG_FILE: &str = "config.toml";
const PROGRESS_FILE: &str = "progress.toml";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config ─────────────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Language code sent with every query.
    #[serde(default = "default_language")]
    pub language: String,

    #[serde(default)]
    pub game_mode: GameMode,

    /// Quest API base URL.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Per-request timeout. Unset means requests never time out.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,

    /// Default output format: table, json, yaml, or plain.
    #[serde(default = "default_output")]
    pub output: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: default_language(),
            game_mode: GameMode::default(),
            api_url: default_api_url(),
            timeout_secs: None,
            refresh_interval_secs: default_refresh_interval(),
            output: default_output(),
        }
    }
}

fn default_language() -> String {
    "en".into()
}
fn default_api_url() -> String {
    DEFAULT_API_URL.into()
}
fn default_refresh_interval() -> u64 {
    600
}
fn default_output() -> String {
    "table".into()
}

impl Config {
    /// Build the service configuration. Fails on an unparseable URL or a
    /// zero refresh interval.
    pub fn to_service_config(&self) -> Result<QuestsConfig, ConfigError> {
        let api_url: url::Url = self.api_url.parse().map_err(|_| ConfigError::Validation {
            field: "api_url".into(),
            reason: format!("invalid URL: {}", self.api_url),
        })?;

        if self.refresh_interval_secs == 0 {
            return Err(ConfigError::Validation {
                field: "refresh_interval_secs".into(),
                reason: "must be greater than zero".into(),
            });
        }

        Ok(QuestsConfig {
            api_url,
            timeout: self.timeout_secs.map(Duration::from_secs),
            refresh_interval: Duration::from_secs(self.refresh_interval_secs),
        })
    }
}

// ── File paths ──────────────────────────────────────────────────────

fn config_dir() -> PathBuf {
    ProjectDirs::from("dev", "questline", "questline").map_or_else(
        || {
            let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
            p.push(".config");
            p.push("questline");
            p
        },
        |dirs| dirs.config_dir().to_path_buf(),
    )
}

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    config_dir().join(CONFIG_FILE)
}

/// Default location of the player progress file, next to the config.
pub fn progress_path() -> PathBuf {
    config_dir().join(PROGRESS_FILE)
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the Config from `path` + environment. A missing file is not an
/// error; defaults fill the gaps.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    debug!(path = %path.display(), "loading config");

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).only(&[
            "language",
            "game_mode",
            "api_url",
            "timeout_secs",
            "refresh_interval_secs",
            "output",
        ]));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write it to `path`, creating parents.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Progress file ───────────────────────────────────────────────────

/// Load player progress. A missing file yields default settings, so a
/// fresh install reports every quest active.
pub fn load_progress(path: &Path) -> Result<Settings, ConfigError> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no progress file; using defaults");
            return Ok(Settings::default());
        }
        Err(err) => return Err(err.into()),
    };

    toml::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
