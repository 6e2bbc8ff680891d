//! Circular search area

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;
use crate::geo::{self, BoundingBox, EARTH_RADIUS_METERS};
use crate::value_objects::Coordinate;

/// A circle on the Earth's surface used to bound place searches
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchBoundary {
    center: Coordinate,
    radius_meters: f64,
}

impl SearchBoundary {
    /// Create a boundary
    ///
    /// # Errors
    ///
    /// Returns `InvalidRadius` unless the radius is positive and finite, and
    /// `InvalidCoordinates` if the center is out of range.
    pub fn new(center: Coordinate, radius_meters: f64) -> Result<Self, DomainError> {
        if !radius_meters.is_finite() || radius_meters <= 0.0 {
            return Err(DomainError::InvalidRadius(radius_meters));
        }
        if !center.is_valid() {
            return Err(DomainError::InvalidCoordinates {
                latitude: center.lat(),
                longitude: center.lng(),
            });
        }
        Ok(Self {
            center,
            radius_meters,
        })
    }

    /// Center of the circle
    #[must_use]
    pub const fn center(&self) -> Coordinate {
        self.center
    }

    /// Radius in meters
    #[must_use]
    pub const fn radius_meters(&self) -> f64 {
        self.radius_meters
    }

    /// Distance from the center to `point` in meters
    #[must_use]
    pub fn distance_from_center(&self, point: &Coordinate) -> f64 {
        geo::distance_meters(point, &self.center)
    }

    /// Whether `point` lies within the circle (inclusive)
    #[must_use]
    pub fn contains(&self, point: &Coordinate) -> bool {
        geo::within_radius(point, &self.center, self.radius_meters)
    }

    /// Rectangle enclosing the circle
    ///
    /// Used for providers that only accept rectangular restrictions. Latitudes
    /// are clamped at the poles and longitudes at the antimeridian.
    #[must_use]
    pub fn bounding_box(&self) -> BoundingBox {
        let angular_rad = self.radius_meters / EARTH_RADIUS_METERS;
        let angular = angular_rad.to_degrees();
        let lat = self.center.lat();
        let lng = self.center.lng();
        // Widest longitude offset of the circle; covers the whole band near the poles
        let ratio = angular_rad.sin() / lat.to_radians().cos();
        let lng_span = if angular_rad < std::f64::consts::FRAC_PI_2 && ratio.abs() < 1.0 {
            ratio.asin().to_degrees()
        } else {
            180.0
        };

        BoundingBox {
            min_lat: (lat - angular).max(-90.0),
            max_lat: (lat + angular).min(90.0),
            min_lng: (lng - lng_span).max(-180.0),
            max_lng: (lng + lng_span).min(180.0),
        }
    }
}
