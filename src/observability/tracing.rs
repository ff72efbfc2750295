//! Per-request spans.
//!
//! Every log event emitted while a request is handled (including upstream
//! calls) carries the method, URI and request ID of that request.

use axum::http::Request;
use tower_http::trace::MakeSpan;

use crate::http::request::X_REQUEST_ID;

/// `MakeSpan` for the HTTP `TraceLayer`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestSpan;

impl<B> MakeSpan<B> for RequestSpan {
    fn make_span(&mut self, request: &Request<B>) -> ::tracing::Span {
        let request_id = request
            .headers()
            .get(X_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown");

        ::tracing::info_span!(
            "request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = %request_id,
        )
    }
}
