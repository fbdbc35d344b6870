use thiserror::Error;

/// Top-level error type for the `questline-api` crate.
///
/// Covers every failure mode of a quest data request: transport,
/// HTTP status, GraphQL-level errors, and payload decoding.
/// `questline-core` maps these into its own `CoreError`.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS or client construction error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── API ─────────────────────────────────────────────────────────
    /// Non-success HTTP status from the API.
    #[error("API error (HTTP {status}): {message}")]
    Http { status: u16, message: String },

    /// The GraphQL endpoint answered with errors and no data.
    #[error("GraphQL error: {message}")]
    GraphQl { message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Http { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Http { status: 404, .. } => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_errors_are_transient() {
        let err = Error::Http {
            status: 503,
            message: "unavailable".into(),
        };
        assert!(err.is_transient());
        assert!(!err.is_not_found());
    }

    #[test]
    fn graphql_errors_are_not_transient() {
        let err = Error::GraphQl {
            message: "bad field".into(),
        };
        assert!(!err.is_transient());
    }

    #[test]
    fn http_404_is_not_found() {
        let err = Error::Http {
            status: 404,
            message: "missing".into(),
        };
        assert!(err.is_not_found());
    }
}
