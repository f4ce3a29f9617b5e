//! Error types for the catalog service
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Catalog Error Enum ==
/// Unified error type for the catalog service.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Input rejected before any remote call; carries every failed check
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// Credential exchange with the token endpoint failed
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// The table or search API answered with a failure
    #[error("Remote error{}: {message}", .status.map(|s| format!(" ({})", s)).unwrap_or_default())]
    Remote {
        status: Option<u16>,
        message: String,
    },

    /// Id outside the current row range
    #[error("Not found: {0}")]
    NotFound(String),

    /// Remote call exceeded its time bound
    #[error("Timed out: {0}")]
    Timeout(String),

    /// Local failure (serialization and the like)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CatalogError {
    /// Shorthand for a single-message validation error.
    pub fn invalid(message: impl Into<String>) -> Self {
        CatalogError::Validation(vec![message.into()])
    }

    /// Shorthand for a remote failure with an upstream status.
    pub fn remote(status: Option<u16>, message: impl Into<String>) -> Self {
        CatalogError::Remote {
            status,
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            CatalogError::Timeout(err.to_string())
        } else {
            CatalogError::Remote {
                status: err.status().map(|s| s.as_u16()),
                message: err.to_string(),
            }
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Internal(err.to_string())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        if let CatalogError::Validation(details) = &self {
            let body = Json(json!({
                "error": "Validation failed",
                "details": details,
            }));
            return (StatusCode::BAD_REQUEST, body).into_response();
        }

        let status = match &self {
            CatalogError::Auth(_) => StatusCode::SERVICE_UNAVAILABLE,
            CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
            CatalogError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the catalog service.
pub type Result<T> = std::result::Result<T, CatalogError>;
