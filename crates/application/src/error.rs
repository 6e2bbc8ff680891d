//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// No route alternatives are available
    #[error("No routes available")]
    EmptyRouteSet,

    /// Selected alternative does not exist
    #[error("Route index {index} is out of range ({len} alternatives)")]
    IndexOutOfRange { index: usize, len: usize },

    /// An external provider failed; propagated unchanged, never retried here
    #[error("{service} provider error: {message}")]
    Provider {
        service: &'static str,
        message: String,
        retryable: bool,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ApplicationError {
    /// Create a provider error
    pub fn provider(service: &'static str, message: impl Into<String>, retryable: bool) -> Self {
        Self::Provider {
            service,
            message: message.into(),
            retryable,
        }
    }

    /// Check if this error is retryable
    ///
    /// Only provider errors can be; the decision to retry is the caller's.
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Provider {
                retryable: true,
                ..
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_retryable_flag() {
        assert!(ApplicationError::provider("routes", "timeout", true).is_retryable());
        assert!(!ApplicationError::provider("places", "HTTP 400", false).is_retryable());
        assert!(!ApplicationError::EmptyRouteSet.is_retryable());
    }

    #[test]
    fn test_error_display() {
        let err = ApplicationError::IndexOutOfRange { index: 2, len: 2 };
        assert_eq!(
            err.to_string(),
            "Route index 2 is out of range (2 alternatives)"
        );

        let err = ApplicationError::provider("routes", "HTTP 503", true);
        assert_eq!(err.to_string(), "routes provider error: HTTP 503");
    }

    #[test]
    fn test_domain_error_is_transparent() {
        let err = ApplicationError::from(DomainError::InvalidRadius(-1.0));
        assert_eq!(err.to_string(), "Invalid search radius: -1 m");
    }
}
