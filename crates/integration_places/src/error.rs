//! Places error types

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur during place lookups
#[derive(Debug, Error)]
pub enum PlacesError {
    /// Connection to the places service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The places service answered with a non-success status
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse the provider response
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded, retry after {retry_after_secs:?} seconds")]
    RateLimitExceeded {
        /// Seconds to wait before retrying (if provided by API)
        retry_after_secs: Option<u64>,
    },

    /// API key missing, invalid or not authorised for the Places API
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// No place with the given id
    #[error("Place not found: {0}")]
    NotFound(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Request timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },

    /// The search request was rejected before sending
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl PlacesError {
    /// Returns true if this error is retryable
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_) | Self::Timeout { .. } | Self::RateLimitExceeded { .. }
        )
    }
}
