//! Search result types

use chrono::DateTime;
use serde::{Deserialize, Serialize};

/// One search hit, flattened from the upstream game document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub id: u64,
    pub name: String,
    /// Unix seconds
    pub first_release_date: Option<i64>,
    /// `YYYY-MM-DD` rendering of `first_release_date`
    pub release_date: Option<String>,
    pub platforms: Vec<String>,
    pub genres: Vec<String>,
}

impl GameSummary {
    pub fn new(
        id: u64,
        name: impl Into<String>,
        first_release_date: Option<i64>,
        platforms: Vec<String>,
        genres: Vec<String>,
    ) -> Self {
        let release_date = first_release_date
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .map(|dt| dt.format("%Y-%m-%d").to_string());

        Self {
            id,
            name: name.into(),
            first_release_date,
            release_date,
            platforms,
            genres,
        }
    }
}
