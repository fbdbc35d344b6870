// Shared transport configuration for building reqwest::Client instances.

use std::time::Duration;

const DEFAULT_USER_AGENT: &str = concat!("questline/", env!("CARGO_PKG_VERSION"));

/// Shared transport configuration for building HTTP clients.
///
/// `timeout` is `None` by default: a request that never completes keeps
/// the caller waiting until the connection itself gives up.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            user_agent: DEFAULT_USER_AGENT.into(),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, crate::error::Error> {
        let mut builder = reqwest::Client::builder().user_agent(self.user_agent.as_str());

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        builder
            .build()
            .map_err(|e| crate::error::Error::Tls(format!("failed to build HTTP client: {e}")))
    }

    /// Set a request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
