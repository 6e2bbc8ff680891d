//! Great-circle distance on a spherical Earth

use crate::value_objects::Coordinate;

/// Mean Earth radius used by the haversine formula
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Haversine distance between two coordinates in meters
///
/// Accurate to roughly 0.5% for city-scale distances; the sphere
/// approximation is not meant for geodesic surveying.
#[must_use]
pub fn distance_meters(a: &Coordinate, b: &Coordinate) -> f64 {
    let lat1_rad = a.lat().to_radians();
    let lat2_rad = b.lat().to_radians();
    let delta_lat = (b.lat() - a.lat()).to_radians();
    let delta_lng = (b.lng() - a.lng()).to_radians();

    let h = (lat1_rad.cos() * lat2_rad.cos()).mul_add(
        (delta_lng / 2.0).sin().powi(2),
        (delta_lat / 2.0).sin().powi(2),
    );
    // Rounding can push h a hair above 1 for antipodal points
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_METERS * c
}

/// Whether `a` lies within `radius_meters` of `b` (inclusive)
#[must_use]
pub fn within_radius(a: &Coordinate, b: &Coordinate, radius_meters: f64) -> bool {
    distance_meters(a, b) <= radius_meters
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(lat: f64, lng: f64) -> Coordinate {
        Coordinate::new(lat, lng).unwrap()
    }

    #[test]
    fn test_distance_same_point() {
        let p = coord(48.8566, 2.3522);
        assert!(distance_meters(&p, &p).abs() < 1e-6);
    }

    #[test]
    fn test_distance_new_york_los_angeles() {
        let ny = coord(40.7128, -74.0060);
        let la = coord(34.0522, -118.2437);
        let d = distance_meters(&ny, &la);
        assert!((d - 3_936_000.0).abs() < 39_360.0, "got {d}");
    }

    #[test]
    fn test_distance_one_degree_latitude() {
        let a = coord(0.0, 0.0);
        let b = coord(1.0, 0.0);
        // 2 * pi * R / 360
        assert!((distance_meters(&a, &b) - 111_194.93).abs() < 1.0);
    }

    #[test]
    fn test_distance_antipodal_is_finite() {
        let a = coord(0.0, 0.0);
        let b = coord(0.0, 180.0);
        let d = distance_meters(&a, &b);
        assert!(d.is_finite());
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_METERS).abs() < 1.0);
    }

    #[test]
    fn test_within_radius_inclusive() {
        let a = coord(52.52, 13.405);
        let b = coord(52.53, 13.405);
        let d = distance_meters(&a, &b);
        assert!(within_radius(&a, &b, d));
        assert!(!within_radius(&a, &b, d - 0.5));
    }
}
