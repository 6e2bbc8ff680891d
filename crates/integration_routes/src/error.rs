//! Routing provider error types

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur while computing routes
#[derive(Debug, Error)]
pub enum RoutesError {
    /// Connection to the routing service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The routing service answered with a non-success status
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

    /// API key missing, invalid or not authorised for the Routes API
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Request timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },

    /// The provider returned zero route candidates
    #[error("No routes returned by the routing service")]
    EmptyRouteSet,

    /// The request or response violated a domain rule
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl RoutesError {
    /// Returns true if this error is retryable
    ///
    /// Informational only: this crate never retries on its own.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_) | Self::Timeout { .. } | Self::RateLimitExceeded { .. }
        )
    }
}
