//! Domain-level errors

use thiserror::Error;

use crate::geo::PolylineError;

/// Errors that can occur in the domain layer
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// Latitude or longitude outside the valid range
    #[error("Invalid coordinates: ({latitude}, {longitude})")]
    InvalidCoordinates { latitude: f64, longitude: f64 },

    /// Search radius must be a positive, finite number of meters
    #[error("Invalid search radius: {0} m")]
    InvalidRadius(f64),

    /// Malformed encoded polyline
    #[error(transparent)]
    Polyline(#[from] PolylineError),

    /// Origin and destination are too far apart to route
    #[error(
        "Route distance {distance_meters:.0} m exceeds the limit of {limit_meters:.0} m"
    )]
    DistanceLimitExceeded {
        distance_meters: f64,
        limit_meters: f64,
    },

    /// Route request combines fields that are not valid for its travel mode
    #[error("Invalid route request: {0}")]
    InvalidRouteRequest(String),

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl DomainError {
    /// Create an invalid route request error
    pub fn invalid_request(reason: impl Into<String>) -> Self {
        Self::InvalidRouteRequest(reason.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_request_creates_correct_error() {
        let err = DomainError::invalid_request("waypoints not allowed");
        match err {
            DomainError::InvalidRouteRequest(reason) => {
                assert_eq!(reason, "waypoints not allowed");
            },
            _ => unreachable!("Expected InvalidRouteRequest error"),
        }
    }

    #[test]
    fn distance_limit_error_message() {
        let err = DomainError::DistanceLimitExceeded {
            distance_meters: 18_903_000.4,
            limit_meters: 1_000_000.0,
        };
        assert_eq!(
            err.to_string(),
            "Route distance 18903000 m exceeds the limit of 1000000 m"
        );
    }

    #[test]
    fn polyline_error_is_transparent() {
        let err = DomainError::from(PolylineError::UnterminatedChunk { position: 3 });
        assert_eq!(
            err.to_string(),
            PolylineError::UnterminatedChunk { position: 3 }.to_string()
        );
    }

    #[test]
    fn invalid_radius_error_message() {
        let err = DomainError::InvalidRadius(-5.0);
        assert_eq!(err.to_string(), "Invalid search radius: -5 m");
    }

    #[test]
    fn validation_error_message() {
        let err = DomainError::ValidationError("query is required".to_string());
        assert_eq!(err.to_string(), "Validation failed: query is required");
    }
}
