//! Upstream failure descriptions.

use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;

/// Why an upstream call failed.
///
/// Every variant is the same kind of failure to callers (the handler answers
/// 500); the variants only differ in the message that gets logged.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// URL could not be assembled from the base URL.
    #[error("invalid upstream URL: {0}")]
    Url(String),

    /// Connection, TLS or body transfer failed.
    #[error("failed to reach upstream: {0}")]
    Transport(#[from] reqwest::Error),

    /// Upstream answered with a non-2xx status.
    #[error("upstream returned status {0}")]
    Status(StatusCode),

    /// Body was not the expected JSON shape.
    #[error("failed to decode upstream response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Deadline elapsed before upstream answered.
    #[error("upstream request timed out after {}ms", .0.as_millis())]
    Timeout(Duration),
}

impl UpstreamError {
    /// Short label used for metrics.
    pub fn outcome(&self) -> &'static str {
        match self {
            UpstreamError::Url(_) => "url",
            UpstreamError::Transport(_) => "transport",
            UpstreamError::Status(_) => "status",
            UpstreamError::Decode(_) => "decode",
            UpstreamError::Timeout(_) => "timeout",
        }
    }
}

pub type UpstreamResult<T> = Result<T, UpstreamError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = UpstreamError::Status(StatusCode::FORBIDDEN);
        assert_eq!(err.to_string(), "upstream returned status 403 Forbidden");

        let err = UpstreamError::Timeout(Duration::from_secs(5));
        assert_eq!(err.to_string(), "upstream request timed out after 5000ms");
        assert_eq!(err.outcome(), "timeout");
    }
}
