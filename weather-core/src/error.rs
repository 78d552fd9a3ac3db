use thiserror::Error;

use crate::response::ErrorPayload;

/// Failures surfaced by the weather lookup service.
///
/// All variants propagate to the caller; nothing is swallowed or retried at
/// this layer. The cache-hit path can only fail with `Store`.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The provider answered with a structured error payload.
    #[error("weather provider error {} ({}): {}", .0.code, .0.error_type, .0.info)]
    UpstreamApi(ErrorPayload),

    /// The body matched neither the success nor the error shape. Fatal:
    /// usually means the provider contract changed.
    #[error("unrecognized weather provider response: {body}")]
    UnrecognizedResponse { body: String },

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Network-level failure of the single-shot upstream call. Never retried.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to send request to weather provider: {0}")]
    Send(#[source] reqwest::Error),

    #[error("failed to read weather provider response body: {0}")]
    Body(#[source] reqwest::Error),

    #[error("weather provider request failed with status {status}: {body}")]
    Status { status: reqwest::StatusCode, body: String },
}

/// Failure in a freshness store adapter.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("store serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_api_error_renders_payload_fields() {
        let err = WeatherError::UpstreamApi(ErrorPayload {
            code: "615".to_string(),
            error_type: "request_failed".to_string(),
            info: "Your API request failed.".to_string(),
        });

        let msg = err.to_string();
        assert!(msg.contains("615"));
        assert!(msg.contains("request_failed"));
        assert!(msg.contains("Your API request failed."));
    }

    #[test]
    fn store_error_wraps_io() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = WeatherError::from(StoreError::from(io));
        assert!(matches!(err, WeatherError::Store(StoreError::Io(_))));
    }
}
