// Async HTTP client for the quest GraphQL API.
//
// Endpoint: POST {base}/graphql
// Every query takes `lang` and `gameMode` variables.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::Error;
use crate::query::{QUESTS_QUERY, TRADERS_QUERY};
use crate::transport::TransportConfig;
use crate::types::{
    GraphQlRequest, GraphQlResponse, LangModeVariables, QuestDataResponse, TraderResponse,
    TradersData,
};

/// Async client for the quest GraphQL API.
///
/// One instance can serve any number of languages and game modes; both
/// are per-request variables, not client state.
#[derive(Debug, Clone)]
pub struct QuestsClient {
    http: reqwest::Client,
    base_url: Url,
}

impl QuestsClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build a client from a base URL (e.g. `https://api.tarkov.dev`)
    /// and a transport config.
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::with_client(http, base_url)
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: &str) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Ensure the base path ends with `/` so relative joins append
    /// instead of replacing the last segment.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    /// The API base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// Fetch the quest dataset (achievements, prestige tiers, tasks) for
    /// a language and game mode.
    pub async fn fetch_quests(
        &self,
        language: &str,
        game_mode: &str,
    ) -> Result<QuestDataResponse, Error> {
        let data: QuestDataResponse = self
            .query(
                QUESTS_QUERY,
                LangModeVariables {
                    lang: language,
                    game_mode,
                },
            )
            .await?;

        debug!(
            language,
            game_mode,
            tasks = data.tasks.len(),
            achievements = data.achievements.len(),
            prestige = data.prestige.len(),
            "quest data fetched"
        );
        Ok(data)
    }

    /// Fetch the trader list for a language and game mode.
    pub async fn fetch_traders(
        &self,
        language: &str,
        game_mode: &str,
    ) -> Result<Vec<TraderResponse>, Error> {
        let data: TradersData = self
            .query(
                TRADERS_QUERY,
                LangModeVariables {
                    lang: language,
                    game_mode,
                },
            )
            .await?;
        Ok(data.traders)
    }

    // ── Transport ────────────────────────────────────────────────────

    async fn query<T, V>(&self, query: &str, variables: V) -> Result<T, Error>
    where
        T: DeserializeOwned,
        V: Serialize + Send + Sync,
    {
        let url = self.base_url.join("graphql")?;
        debug!("POST {url}");

        let resp = self
            .http
            .post(url)
            .json(&GraphQlRequest { query, variables })
            .send()
            .await?;

        let envelope: GraphQlResponse<T> = self.handle_response(resp).await?;
        Self::unwrap_envelope(envelope)
    }

    /// Strip the `{ data, errors }` envelope.
    ///
    /// Errors alongside data are logged and the partial data is returned;
    /// errors without data fail the request.
    fn unwrap_envelope<T>(envelope: GraphQlResponse<T>) -> Result<T, Error> {
        match envelope.data {
            Some(data) => {
                for err in &envelope.errors {
                    warn!(error = %err.message, "GraphQL partial error");
                }
                Ok(data)
            }
            None => {
                let message = if envelope.errors.is_empty() {
                    "response contained no data".to_owned()
                } else {
                    envelope
                        .errors
                        .iter()
                        .map(|e| e.message.as_str())
                        .collect::<Vec<_>>()
                        .join("; ")
                };
                Err(Error::GraphQl { message })
            }
        }
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
                message: if body.is_empty() {
                    status.to_string()
                } else {
                    body
                },
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body,
            }
        })
    }
}
