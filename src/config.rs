//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;
use std::str::FromStr;

use crate::cache::DEFAULT_TTL_SECS;
use crate::search::SearchConfig;

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Spreadsheet backing the catalog; None selects the in-memory table
    pub spreadsheet_id: Option<String>,
    /// Sheet (tab) holding the records
    pub sheet_name: String,
    /// OAuth access token for the spreadsheet API
    pub sheets_access_token: Option<String>,
    /// Base URL of the spreadsheet API
    pub sheets_api_base: String,
    /// Search API client id
    pub igdb_client_id: Option<String>,
    /// Search API client secret
    pub igdb_client_secret: Option<String>,
    /// OAuth client-credentials endpoint
    pub token_url: String,
    /// Search endpoint
    pub igdb_api_url: String,
    /// Upper bound for every remote call, in seconds
    pub request_timeout_secs: u64,
    /// Maximum number of entries the cache can hold
    pub cache_max_entries: usize,
    /// Default TTL in seconds for cache entries without explicit TTL
    pub cache_default_ttl: u64,
    /// TTL in seconds for memoized search results
    pub search_cache_ttl: u64,
    /// Background cache sweep interval in seconds
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `SPREADSHEET_ID` - spreadsheet id (default: unset, in-memory table)
    /// - `SHEET_NAME` - sheet holding the records (default: Jogos)
    /// - `SHEETS_ACCESS_TOKEN` - bearer token for the spreadsheet API
    /// - `SHEETS_API_BASE` - spreadsheet API base URL
    /// - `IGDB_CLIENT_ID` / `IGDB_CLIENT_SECRET` - search API credentials
    /// - `TWITCH_TOKEN_URL` - token endpoint
    /// - `IGDB_API_URL` - search endpoint
    /// - `REQUEST_TIMEOUT_SECS` - remote call timeout (default: 10)
    /// - `CACHE_MAX_ENTRIES` - maximum cache entries (default: 1000)
    /// - `CACHE_DEFAULT_TTL` - default cache TTL in seconds (default: 300)
    /// - `SEARCH_CACHE_TTL` - search result TTL in seconds (default: 3600)
    /// - `CLEANUP_INTERVAL` - cache sweep frequency in seconds (default: 60)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: parsed("SERVER_PORT").unwrap_or(defaults.server_port),
            spreadsheet_id: non_empty("SPREADSHEET_ID"),
            sheet_name: non_empty("SHEET_NAME").unwrap_or(defaults.sheet_name),
            sheets_access_token: non_empty("SHEETS_ACCESS_TOKEN"),
            sheets_api_base: non_empty("SHEETS_API_BASE").unwrap_or(defaults.sheets_api_base),
            igdb_client_id: non_empty("IGDB_CLIENT_ID"),
            igdb_client_secret: non_empty("IGDB_CLIENT_SECRET"),
            token_url: non_empty("TWITCH_TOKEN_URL").unwrap_or(defaults.token_url),
            igdb_api_url: non_empty("IGDB_API_URL").unwrap_or(defaults.igdb_api_url),
            request_timeout_secs: parsed("REQUEST_TIMEOUT_SECS")
                .unwrap_or(defaults.request_timeout_secs),
            cache_max_entries: parsed("CACHE_MAX_ENTRIES").unwrap_or(defaults.cache_max_entries),
            cache_default_ttl: parsed("CACHE_DEFAULT_TTL").unwrap_or(defaults.cache_default_ttl),
            search_cache_ttl: parsed("SEARCH_CACHE_TTL").unwrap_or(defaults.search_cache_ttl),
            cleanup_interval: parsed("CLEANUP_INTERVAL").unwrap_or(defaults.cleanup_interval),
        }
    }

    /// Settings for the search client.
    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            client_id: self.igdb_client_id.clone(),
            client_secret: self.igdb_client_secret.clone(),
            token_url: self.token_url.clone(),
            api_url: self.igdb_api_url.clone(),
            timeout_secs: self.request_timeout_secs,
            result_ttl: self.search_cache_ttl,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            spreadsheet_id: None,
            sheet_name: "Jogos".to_string(),
            sheets_access_token: None,
            sheets_api_base: "https://sheets.googleapis.com/v4".to_string(),
            igdb_client_id: None,
            igdb_client_secret: None,
            token_url: "https://id.twitch.tv/oauth2/token".to_string(),
            igdb_api_url: "https://api.igdb.com/v4/games".to_string(),
            request_timeout_secs: 10,
            cache_max_entries: 1000,
            cache_default_ttl: DEFAULT_TTL_SECS,
            search_cache_ttl: 3600,
            cleanup_interval: 60,
        }
    }
}

fn non_empty(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parsed<T: FromStr>(name: &str) -> Option<T> {
    non_empty(name).and_then(|v| v.parse().ok())
}
