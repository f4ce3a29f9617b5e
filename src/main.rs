//! Game Catalog - a personal game list kept in a spreadsheet
//!
//! Serves the catalog CRUD, CSV export and game search over HTTP.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use game_catalog::api::{create_router, AppState};
use game_catalog::models::HEADER;
use game_catalog::table::{MemoryTable, SheetsTable, Table};
use game_catalog::{spawn_cleanup_task, Config};

/// Main entry point for the catalog server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Pick the table backend and build the shared state
/// 4. Start background cache sweep
/// 5. Serve HTTP until SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "game_catalog=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Game Catalog server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: sheet={}, port={}, cache_max_entries={}, default_ttl={}s, timeout={}s",
        config.sheet_name,
        config.server_port,
        config.cache_max_entries,
        config.cache_default_ttl,
        config.request_timeout_secs
    );

    let table = build_table(&config)?;
    let state = AppState::from_config(&config, table).context("failed to build application state")?;
    if config.igdb_client_id.is_none() || config.igdb_client_secret.is_none() {
        warn!("IGDB credentials not set; search will answer 503");
    }

    let cleanup_handle = spawn_cleanup_task(state.cache.clone(), config.cleanup_interval);
    info!("Background cache sweep started");

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cleanup_handle))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

fn build_table(config: &Config) -> anyhow::Result<Arc<dyn Table>> {
    match &config.spreadsheet_id {
        Some(spreadsheet_id) => {
            if config.sheets_access_token.is_none() {
                warn!("SHEETS_ACCESS_TOKEN not set; spreadsheet calls are unauthenticated");
            }
            let table = SheetsTable::new(
                config.sheets_api_base.as_str(),
                spreadsheet_id.as_str(),
                config.sheets_access_token.clone(),
                config.request_timeout_secs,
            )
            .context("failed to build spreadsheet client")?;
            info!(spreadsheet_id = %spreadsheet_id, "using spreadsheet table");
            Ok(Arc::new(table))
        }
        None => {
            warn!("SPREADSHEET_ID not set; records are kept in memory only");
            Ok(Arc::new(MemoryTable::with_header(
                config.sheet_name.as_str(),
                &HEADER,
            )))
        }
    }
}

/// Waits for Ctrl+C or SIGTERM, then stops the cache sweep.
async fn shutdown_signal(cleanup_handle: tokio::task::JoinHandle<()>) {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    cleanup_handle.abort();
    warn!("Cache sweep aborted");
}
