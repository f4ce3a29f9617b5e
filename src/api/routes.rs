//! API Routes
//!
//! Configures the Axum router with all catalog endpoints.

use axum::{
    routing::{delete, get},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    cache_stats_handler, clear_token_handler, create_game_handler, delete_game_handler,
    export_handler, flush_cache_handler, get_game_handler, health_handler, list_games_handler,
    search_handler, update_game_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/games", get(list_games_handler).post(create_game_handler))
        .route("/api/games/export", get(export_handler))
        .route(
            "/api/games/:id",
            get(get_game_handler)
                .put(update_game_handler)
                .delete(delete_game_handler),
        )
        .route("/api/search", get(search_handler))
        .route("/api/search/token", delete(clear_token_handler))
        .route("/api/cache/stats", get(cache_stats_handler))
        .route("/api/cache", delete(flush_cache_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
