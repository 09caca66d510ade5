//! Request-level error taxonomy.
//!
//! Every failure a handler can hit falls into one of three kinds, and each
//! kind maps to an HTTP status exactly once, here. Bodies are plain text.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ActionError {
    /// Malformed client input: bad address, bad amount, bad host header
    #[error("{0}")]
    InvalidInput(String),

    /// Well-formed request that violates a ledger rule
    #[error("{0}")]
    BusinessRule(String),

    /// Remote node call or response encoding failed
    #[error("upstream failure: {0}")]
    Upstream(#[from] anyhow::Error),
}

impl ActionError {
    /// Rejection for a named query parameter, worded as clients expect it
    pub fn invalid_param(name: &str) -> Self {
        ActionError::InvalidInput(format!("Invalid input query parameter: {}", name))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ActionError::InvalidInput(_) | ActionError::BusinessRule(_) => StatusCode::BAD_REQUEST,
            ActionError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ActionError {
    fn into_response(self) -> Response {
        match &self {
            ActionError::Upstream(err) => {
                tracing::error!(err = ?err, "request failed upstream");
            }
            other => {
                tracing::warn!(err = %other, "request rejected");
            }
        }
        (self.status(), self.to_string()).into_response()
    }
}
