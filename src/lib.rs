//! Game Catalog - a personal game list kept in a spreadsheet
//!
//! Positional-row CRUD over a sheet, plus a credentialed game database
//! search memoized in a TTL cache.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod search;
pub mod store;
pub mod table;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use error::{CatalogError, Result};
pub use store::RecordStore;
pub use tasks::spawn_cleanup_task;
