//! Response handling.
//!
//! # Responsibilities
//! - Map handler failures to status codes with a plain-text body
//! - Keep upstream failure details in the logs, not in the response
//!
//! # Design Decisions
//! - Client input errors → 400 with the reason
//! - Any upstream failure → 500 with a generic message
//! - Successful bodies are always JSON arrays (`Json<Vec<_>>`), so an empty
//!   upstream result is written as `[]`, never `null`

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::http::params::ParamError;
use crate::upstream::UpstreamError;

/// Errors a handler can answer with.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    BadRequest(#[from] ParamError),

    #[error("{message}: {source}")]
    Upstream {
        message: &'static str,
        #[source]
        source: UpstreamError,
    },
}

impl ApiError {
    pub fn teams(source: UpstreamError) -> Self {
        ApiError::Upstream { message: "Failed to fetch teams", source }
    }

    pub fn matches(source: UpstreamError) -> Self {
        ApiError::Upstream { message: "Failed to fetch matches", source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Upstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            ApiError::BadRequest(e) => {
                tracing::debug!(error = ?e, "Rejected request parameters");
                (status, e.to_string()).into_response()
            }
            ApiError::Upstream { message, source } => {
                tracing::error!(error = %source, "{}", message);
                (status, message).into_response()
            }
        }
    }
}
