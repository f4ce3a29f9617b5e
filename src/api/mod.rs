//! API Module
//!
//! Thin HTTP adapter over the catalog core.
//!
//! # Endpoints
//! - `GET /api/games` / `POST /api/games` - list / add records
//! - `GET|PUT|DELETE /api/games/:id` - one record by positional id
//! - `GET /api/games/export` - CSV download
//! - `GET /api/search?q=` - game database search
//! - `DELETE /api/search/token` - force re-authentication
//! - `GET /api/cache/stats` / `DELETE /api/cache` - cache introspection / flush
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
