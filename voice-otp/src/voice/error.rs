//! Error types for voice dispatch.

use thiserror::Error;

/// Result type alias for dispatch operations.
pub type Result<T> = std::result::Result<T, DispatchError>;

/// Everything that can go wrong while placing a voice call.
///
/// None of these reach the webhook caller; they are logged by the
/// background dispatcher.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Provider credentials are missing from the configuration.
    #[error("8x8 voice provider not configured: missing {0}")]
    NotConfigured(&'static str),

    /// The request never produced a response (DNS, connect, TLS, timeout).
    #[error("8x8 request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The provider answered with a non-2xx status.
    #[error("8x8 API error: {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// `message` field of the response body, or "Unknown error"
        message: String,
    },

    /// The provider answered with a body that is not JSON.
    #[error("8x8 returned an unparseable response (HTTP {status}): {source}")]
    InvalidResponse {
        /// HTTP status code
        status: u16,
        /// Parse failure
        source: serde_json::Error,
    },
}

impl DispatchError {
    /// Whether the provider itself rejected or garbled the request, as opposed
    /// to a local or network problem.
    pub fn is_provider_error(&self) -> bool {
        matches!(self, Self::Api { .. } | Self::InvalidResponse { .. })
    }

    /// HTTP status returned by the provider, if a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } | Self::InvalidResponse { status, .. } => Some(*status),
            Self::NotConfigured(_) | Self::Transport(_) => None,
        }
    }
}
