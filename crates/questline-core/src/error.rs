// ── Core error types ──
//
// User-facing errors from questline-core. Consumers never see raw HTTP
// or GraphQL failures; the `From<questline_api::Error>` impl translates
// them into domain-appropriate variants.

use thiserror::Error;
use tracing::debug;

/// Unified error type for the core crate.
#[derive(Debug, Clone, Error)]
pub enum CoreError {
    // ── Fetch errors ─────────────────────────────────────────────────
    #[error("Cannot reach quest API at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Quest API request timed out")]
    Timeout,

    #[error("Quest fetch failed: {message}")]
    FetchFailed { message: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Returns `true` if a later refresh could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::ConnectionFailed { .. } | Self::Timeout => true,
            Self::Api { status, .. } => matches!(status, Some(429 | 500..=599)),
            _ => false,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<questline_api::Error> for CoreError {
    fn from(err: questline_api::Error) -> Self {
        debug!(error = %err, transient = err.is_transient(), "quest API request failed");

        // A 404 from the GraphQL endpoint means `api_url` points elsewhere.
        if err.is_not_found() {
            return CoreError::Config {
                message: format!("quest API endpoint not found, check api_url ({err})"),
            };
        }

        match err {
            questline_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            questline_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            questline_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            questline_api::Error::Http { status, message } => CoreError::Api {
                message,
                status: Some(status),
            },
            questline_api::Error::GraphQl { message } => CoreError::FetchFailed { message },
            questline_api::Error::Deserialization { message, body: _ } => {
                CoreError::FetchFailed {
                    message: format!("malformed response: {message}"),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_errors_keep_status() {
        let err = CoreError::from(questline_api::Error::Http {
            status: 503,
            message: "down".into(),
        });
        assert!(matches!(err, CoreError::Api { status: Some(503), .. }));
        assert!(err.is_transient());
    }

    #[test]
    fn not_found_points_at_api_url() {
        let err = CoreError::from(questline_api::Error::Http {
            status: 404,
            message: "Not Found".into(),
        });
        assert!(matches!(err, CoreError::Config { ref message } if message.contains("api_url")));
        assert!(!err.is_transient());
    }

    #[test]
    fn graphql_errors_become_fetch_failures() {
        let err = CoreError::from(questline_api::Error::GraphQl {
            message: "bad query".into(),
        });
        assert!(matches!(err, CoreError::FetchFailed { .. }));
        assert!(!err.is_transient());
    }
}
