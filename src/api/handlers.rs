//! API Handlers
//!
//! HTTP request handlers; each one forwards to the record store, the search
//! client or the shared cache.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::cache::{CacheStats, CacheStore, SharedCache};
use crate::config::Config;
use crate::error::{CatalogError, Result};
use crate::models::{GameDraft, GameRecord, GameSummary, HealthResponse, MessageResponse};
use crate::search::SearchClient;
use crate::store::{RecordStore, CSV_BOM};
use crate::table::Table;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: RecordStore,
    pub search: Arc<SearchClient>,
    pub cache: SharedCache,
}

impl AppState {
    pub fn new(store: RecordStore, search: Arc<SearchClient>, cache: SharedCache) -> Self {
        Self {
            store,
            search,
            cache,
        }
    }

    /// Wires the store, cache and search client from configuration.
    pub fn from_config(config: &Config, table: Arc<dyn Table>) -> Result<Self> {
        let cache = SharedCache::new(CacheStore::new(
            config.cache_max_entries,
            config.cache_default_ttl,
        ));
        let search = SearchClient::new(config.search_config(), cache.clone())?;
        let store = RecordStore::new(table, config.sheet_name.as_str());
        Ok(Self::new(store, Arc::new(search), cache))
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

/// Handler for GET /api/games
pub async fn list_games_handler(State(state): State<AppState>) -> Result<Json<Vec<GameRecord>>> {
    Ok(Json(state.store.get_all().await?))
}

/// Handler for GET /api/games/:id
pub async fn get_game_handler(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<GameRecord>> {
    Ok(Json(state.store.get(id).await?))
}

/// Handler for POST /api/games
pub async fn create_game_handler(
    State(state): State<AppState>,
    Json(draft): Json<GameDraft>,
) -> Result<(StatusCode, Json<MessageResponse>)> {
    state.store.add(&draft).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::added(draft.nome.trim())),
    ))
}

/// Handler for PUT /api/games/:id
pub async fn update_game_handler(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    Json(draft): Json<GameDraft>,
) -> Result<Json<MessageResponse>> {
    state.store.update(id, &draft).await?;
    Ok(Json(MessageResponse::updated(id)))
}

/// Handler for DELETE /api/games/:id
pub async fn delete_game_handler(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<MessageResponse>> {
    state.store.delete(id).await?;
    Ok(Json(MessageResponse::deleted(id)))
}

/// Handler for GET /api/games/export
pub async fn export_handler(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let csv = state.store.export_csv().await?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"jogos.csv\""),
        ],
        format!("{}{}", CSV_BOM, csv),
    ))
}

/// Handler for GET /api/search?q=
pub async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<GameSummary>>> {
    let query = params
        .q
        .ok_or_else(|| CatalogError::invalid("query parameter 'q' is required"))?;
    Ok(Json(state.search.search_games(&query).await?))
}

/// Handler for DELETE /api/search/token
pub async fn clear_token_handler(State(state): State<AppState>) -> Json<MessageResponse> {
    state.search.clear_token().await;
    Json(MessageResponse::new("Search token cleared"))
}

/// Handler for GET /api/cache/stats
pub async fn cache_stats_handler(State(state): State<AppState>) -> Json<CacheStats> {
    Json(state.cache.stats().await)
}

/// Handler for DELETE /api/cache
pub async fn flush_cache_handler(State(state): State<AppState>) -> Json<MessageResponse> {
    state.cache.flush().await;
    Json(MessageResponse::new("Cache flushed"))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
