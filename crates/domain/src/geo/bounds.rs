//! Axis-aligned latitude/longitude bounding box

use serde::{Deserialize, Serialize};

use crate::value_objects::Coordinate;

/// Smallest lat/lng rectangle covering a set of points
///
/// Does not handle rectangles that cross the antimeridian.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl BoundingBox {
    /// Degenerate box around a single point
    #[must_use]
    pub const fn around(point: Coordinate) -> Self {
        Self {
            min_lat: point.lat(),
            max_lat: point.lat(),
            min_lng: point.lng(),
            max_lng: point.lng(),
        }
    }

    /// Box covering every point, or `None` for an empty iterator
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Coordinate>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = Self::around(*iter.next()?);
        Some(iter.fold(first, |mut bounds, point| {
            bounds.extend(point);
            bounds
        }))
    }

    /// Grow the box to include `point`
    pub fn extend(&mut self, point: &Coordinate) {
        self.min_lat = self.min_lat.min(point.lat());
        self.max_lat = self.max_lat.max(point.lat());
        self.min_lng = self.min_lng.min(point.lng());
        self.max_lng = self.max_lng.max(point.lng());
    }

    /// Smallest box covering both boxes
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min_lat: self.min_lat.min(other.min_lat),
            max_lat: self.max_lat.max(other.max_lat),
            min_lng: self.min_lng.min(other.min_lng),
            max_lng: self.max_lng.max(other.max_lng),
        }
    }

    /// Whether `point` lies inside or on the edge of the box
    #[must_use]
    pub fn contains(&self, point: &Coordinate) -> bool {
        (self.min_lat..=self.max_lat).contains(&point.lat())
            && (self.min_lng..=self.max_lng).contains(&point.lng())
    }

    /// South-west corner
    #[must_use]
    pub const fn south_west(&self) -> Coordinate {
        Coordinate::new_unchecked(self.min_lat, self.min_lng)
    }

    /// North-east corner
    #[must_use]
    pub const fn north_east(&self) -> Coordinate {
        Coordinate::new_unchecked(self.max_lat, self.max_lng)
    }

    /// Midpoint of the box
    #[must_use]
    pub fn center(&self) -> Coordinate {
        Coordinate::new_unchecked(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lng + self.max_lng) / 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(lat: f64, lng: f64) -> Coordinate {
        Coordinate::new_unchecked(lat, lng)
    }

    #[test]
    fn test_from_points_empty() {
        assert!(BoundingBox::from_points(Vec::<Coordinate>::new().iter()).is_none());
    }

    #[test]
    fn test_from_points_covers_all() {
        let points = [coord(38.5, -120.2), coord(40.7, -120.95), coord(43.252, -126.453)];
        let bounds = BoundingBox::from_points(&points).unwrap();
        assert!((bounds.min_lat - 38.5).abs() < f64::EPSILON);
        assert!((bounds.max_lat - 43.252).abs() < f64::EPSILON);
        assert!((bounds.min_lng - -126.453).abs() < f64::EPSILON);
        assert!((bounds.max_lng - -120.2).abs() < f64::EPSILON);
        assert!(points.iter().all(|p| bounds.contains(p)));
    }

    #[test]
    fn test_union() {
        let a = BoundingBox::around(coord(1.0, 1.0));
        let b = BoundingBox::around(coord(-1.0, 3.0));
        let u = a.union(&b);
        assert_eq!(u.south_west(), coord(-1.0, 1.0));
        assert_eq!(u.north_east(), coord(1.0, 3.0));
        assert_eq!(u.center(), coord(0.0, 2.0));
    }

    #[test]
    fn test_contains_rejects_outside() {
        let bounds = BoundingBox::from_points(&[coord(0.0, 0.0), coord(1.0, 1.0)]).unwrap();
        assert!(!bounds.contains(&coord(1.5, 0.5)));
        assert!(bounds.contains(&coord(1.0, 1.0)));
    }
}
