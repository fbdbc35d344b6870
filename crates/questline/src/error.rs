//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use questline_config::ConfigError;
use questline_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const CONFIG: i32 = 3;
    pub const API: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the quest API at {url}")]
    #[diagnostic(
        code(questline::connection_failed),
        help(
            "Check your network connection and the configured API URL.\n\
             Override it with --api-url or QUESTLINE_API_URL."
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Quest API request timed out")]
    #[diagnostic(
        code(questline::timeout),
        help("Raise timeout_secs in the config file, or remove it to wait indefinitely.")
    )]
    Timeout,

    // ── API ──────────────────────────────────────────────────────────
    #[error("Quest fetch failed: {message}")]
    #[diagnostic(
        code(questline::fetch_failed),
        help("The API rejected the query. Check --lang and --mode values.")
    )]
    FetchFailed { message: String },

    #[error("API error ({status}): {message}")]
    #[diagnostic(code(questline::api_error))]
    Api { message: String, status: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(questline::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(
        code(questline::config),
        help("Inspect the effective configuration with: questline config show")
    )]
    Config(#[from] ConfigError),

    #[error("Configuration file already exists at {path}")]
    #[diagnostic(
        code(questline::config_exists),
        help("Pass --force to overwrite it.")
    )]
    ConfigExists { path: String },

    // ── Internal ─────────────────────────────────────────────────────
    #[error("Internal error: {0}")]
    #[diagnostic(code(questline::internal))]
    Internal(String),

    // ── IO / Serialization ────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render JSON: {0}")]
    #[diagnostic(code(questline::json))]
    Json(#[from] serde_json::Error),

    #[error("Failed to render YAML: {0}")]
    #[diagnostic(code(questline::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::FetchFailed { .. } | Self::Api { .. } => exit_code::API,
            Self::Validation { .. } => exit_code::USAGE,
            Self::Config(_) | Self::ConfigExists { .. } => exit_code::CONFIG,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed {
                url,
                source: reason.into(),
            },
            CoreError::Timeout => CliError::Timeout,
            CoreError::FetchFailed { message } => CliError::FetchFailed { message },
            CoreError::Api { message, status } => CliError::Api {
                message,
                status: status.map_or_else(|| "no status".into(), |s| s.to_string()),
            },
            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },
            CoreError::Internal(message) => CliError::Internal(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_errors_map_to_exit_codes() {
        let cases = [
            (
                CoreError::ConnectionFailed {
                    url: "https://api.example".into(),
                    reason: "refused".into(),
                },
                exit_code::CONNECTION,
            ),
            (CoreError::Timeout, exit_code::TIMEOUT),
            (
                CoreError::FetchFailed {
                    message: "Unknown language".into(),
                },
                exit_code::API,
            ),
            (
                CoreError::Api {
                    message: "Bad Gateway".into(),
                    status: Some(502),
                },
                exit_code::API,
            ),
            (CoreError::Internal("oops".into()), exit_code::GENERAL),
        ];

        for (core, code) in cases {
            assert_eq!(CliError::from(core).exit_code(), code);
        }
    }
}
