//! Client-side radius check for place results
//!
//! Providers treat a location bias as a hint and may return places far
//! outside the requested circle. Every result is re-checked here against
//! the boundary, whatever constraint was sent upstream.

use domain::{PlaceResult, SearchBoundary};
use tracing::debug;

/// Keep only results inside `boundary`, annotated with their distance
///
/// Order is preserved. An empty output is a valid outcome.
#[must_use]
pub fn enforce_radius(places: Vec<PlaceResult>, boundary: &SearchBoundary) -> Vec<PlaceResult> {
    let total = places.len();
    let kept: Vec<PlaceResult> = places
        .into_iter()
        .filter_map(|mut place| {
            let distance = boundary.distance_from_center(&place.location);
            (distance <= boundary.radius_meters()).then(|| {
                place.distance_from_center_meters = Some(distance);
                place
            })
        })
        .collect();

    if kept.len() < total {
        debug!(
            total,
            kept = kept.len(),
            radius = boundary.radius_meters(),
            "Dropped places outside the search radius"
        );
    }
    kept
}

#[cfg(test)]
mod tests {
    use domain::Coordinate;
    use proptest::prelude::*;

    use super::*;
    use crate::services::fixtures::place;

    fn louvre(radius: f64) -> SearchBoundary {
        SearchBoundary::new(Coordinate::new_unchecked(48.8606, 2.3376), radius).unwrap()
    }

    #[test]
    fn test_drops_places_outside_radius() {
        let places = vec![
            place("angelina", 48.8652, 2.3284),
            place("versailles", 48.8049, 2.1204),
            place("tuileries", 48.8635, 2.3275),
        ];

        let kept = enforce_radius(places, &louvre(1_000.0));

        let ids: Vec<_> = kept.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["angelina", "tuileries"]);
        assert!(kept.iter().all(|p| p.distance_from_center_meters.is_some()));
    }

    #[test]
    fn test_all_outside_yields_empty() {
        let kept = enforce_radius(vec![place("lyon", 45.764, 4.8357)], &louvre(5_000.0));
        assert!(kept.is_empty());
    }

    #[test]
    fn test_center_is_kept_with_zero_distance() {
        let kept = enforce_radius(vec![place("louvre", 48.8606, 2.3376)], &louvre(1.0));
        assert_eq!(kept[0].distance_from_center_meters, Some(0.0));
    }

    #[test]
    fn test_overwrites_stale_annotation() {
        let mut stale = place("angelina", 48.8652, 2.3284);
        stale.distance_from_center_meters = Some(1.0);

        let kept = enforce_radius(vec![stale], &louvre(1_000.0));
        assert!(kept[0].distance_from_center_meters.unwrap() > 500.0);
    }

    proptest! {
        #[test]
        fn kept_places_are_within_radius(
            offsets in prop::collection::vec((-0.5f64..0.5, -0.5f64..0.5), 0..40),
            radius in 10.0f64..50_000.0,
        ) {
            let boundary = louvre(radius);
            let places: Vec<_> = offsets
                .iter()
                .enumerate()
                .map(|(i, (dlat, dlng))| place(&i.to_string(), 48.8606 + dlat, 2.3376 + dlng))
                .collect();
            let inside = places
                .iter()
                .filter(|p| boundary.contains(&p.location))
                .count();

            let kept = enforce_radius(places, &boundary);

            prop_assert_eq!(kept.len(), inside);
            for p in &kept {
                let distance = p.distance_from_center_meters.unwrap();
                prop_assert!(distance <= radius);
            }
        }
    }
}
