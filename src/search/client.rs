//! Credentialed search client.

use std::time::{Duration, Instant};

use reqwest::Client;
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use super::token::{AuthToken, TokenSlot};
use crate::cache::SharedCache;
use crate::error::{CatalogError, Result};
use crate::models::GameSummary;

/// Longest accepted search text, in characters.
pub const MAX_QUERY_LEN: usize = 200;

/// Results requested per search.
pub const RESULT_LIMIT: usize = 10;

/// Settings for `SearchClient`.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub token_url: String,
    pub api_url: String,
    pub timeout_secs: u64,
    /// TTL for memoized results, in seconds
    pub result_ttl: u64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

#[derive(Debug, Deserialize)]
struct UpstreamGame {
    id: u64,
    #[serde(default)]
    name: String,
    #[serde(default)]
    first_release_date: Option<i64>,
    #[serde(default)]
    platforms: Vec<NamedRef>,
    #[serde(default)]
    genres: Vec<NamedRef>,
}

#[derive(Debug, Deserialize)]
struct NamedRef {
    #[serde(default)]
    name: String,
}

impl From<UpstreamGame> for GameSummary {
    fn from(game: UpstreamGame) -> Self {
        let names = |refs: Vec<NamedRef>| {
            refs.into_iter()
                .map(|r| r.name)
                .filter(|name| !name.is_empty())
                .collect()
        };
        GameSummary::new(
            game.id,
            game.name,
            game.first_release_date,
            names(game.platforms),
            names(game.genres),
        )
    }
}

// == Search Client ==
/// Searches the game database, owning one bearer token for the process.
///
/// The token lock is held across the credential exchange, so concurrent
/// callers wait for a single fetch instead of each starting one.
pub struct SearchClient {
    http: Client,
    config: SearchConfig,
    token: Mutex<TokenSlot>,
    cache: SharedCache,
}

impl SearchClient {
    pub fn new(config: SearchConfig, cache: SharedCache) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            config,
            token: Mutex::new(TokenSlot::default()),
            cache,
        })
    }

    fn credentials(&self) -> Result<(&str, &str)> {
        match (&self.config.client_id, &self.config.client_secret) {
            (Some(id), Some(secret)) => Ok((id.as_str(), secret.as_str())),
            _ => Err(CatalogError::Auth(
                "search credentials not configured".to_string(),
            )),
        }
    }

    // == Token ==
    /// Returns the cached token, or exchanges client credentials for a new one.
    pub async fn get_token(&self) -> Result<String> {
        let mut slot = self.token.lock().await;
        if let Some(token) = slot.current(Instant::now()) {
            return Ok(token.to_string());
        }

        let (client_id, client_secret) = self.credentials()?;
        debug!("requesting search API token");

        let response = self
            .http
            .post(&self.config.token_url)
            .form(&[
                ("client_id", client_id),
                ("client_secret", client_secret),
                ("grant_type", "client_credentials"),
            ])
            .send()
            .await
            .map_err(|err| {
                error!(error = %err, "token request failed");
                if err.is_timeout() {
                    CatalogError::Timeout(format!("token request: {}", err))
                } else {
                    CatalogError::Auth(err.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), %body, "token endpoint rejected credentials");
            return Err(CatalogError::Auth(format!(
                "token endpoint returned {}: {}",
                status.as_u16(),
                body
            )));
        }

        let body: TokenResponse = response.json().await.map_err(|err| {
            error!(error = %err, "malformed token response");
            CatalogError::Auth(format!("malformed token response: {}", err))
        })?;

        info!(expires_in = body.expires_in, "search API token acquired");
        let token = AuthToken::issued(body.access_token, body.expires_in, Instant::now());
        let value = token.value.clone();
        slot.store(token);
        Ok(value)
    }

    /// Forgets the token; the next call re-authenticates.
    pub async fn clear_token(&self) {
        self.token.lock().await.clear();
        info!("search API token cleared");
    }

    // == Search ==
    /// Up to ten games matching `query`, memoized in the shared cache.
    pub async fn search_games(&self, query: &str) -> Result<Vec<GameSummary>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(CatalogError::invalid("query must not be empty"));
        }
        if query.chars().count() > MAX_QUERY_LEN {
            return Err(CatalogError::invalid(format!(
                "query must be at most {} characters",
                MAX_QUERY_LEN
            )));
        }

        let key = cache_key(query);
        self.cache
            .get_or_fetch(&key, Some(self.config.result_ttl), || self.fetch_games(query))
            .await
    }

    async fn fetch_games(&self, query: &str) -> Result<Vec<GameSummary>> {
        let (client_id, _) = self.credentials()?;
        let token = self.get_token().await.inspect_err(|err| {
            error!(query, error = %err, "search aborted: no token");
        })?;

        let response = self
            .http
            .post(&self.config.api_url)
            .header("Client-ID", client_id)
            .bearer_auth(&token)
            .header(reqwest::header::CONTENT_TYPE, "text/plain")
            .body(search_body(query))
            .send()
            .await
            .map_err(|err| {
                error!(query, error = %err, "search request failed");
                CatalogError::from(err)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(query, status = status.as_u16(), %body, "search API error");
            return Err(CatalogError::remote(Some(status.as_u16()), body));
        }

        let games: Vec<UpstreamGame> = response.json().await.map_err(|err| {
            error!(query, error = %err, "malformed search response");
            CatalogError::remote(Some(status.as_u16()), format!("malformed response: {}", err))
        })?;

        info!(query, results = games.len(), "search completed");
        Ok(games.into_iter().map(GameSummary::from).collect())
    }
}

/// Escapes backslashes and quotes for the upstream query language.
pub fn escape_query(query: &str) -> String {
    query.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Request body for a name search.
pub fn search_body(query: &str) -> String {
    format!(
        "search \"{}\"; fields name, first_release_date, platforms.name, genres.name; limit {};",
        escape_query(query),
        RESULT_LIMIT
    )
}

fn cache_key(query: &str) -> String {
    format!("search:{}", query.to_lowercase())
}
