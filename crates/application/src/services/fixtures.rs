//! Shared route and place fixtures for unit tests

use std::time::Duration;

use domain::{
    Coordinate, EncodedPolyline, Leg, PlaceResult, Route, Step, TransitDetails, TransitStop,
    TravelMode,
};

fn point(lat: f64, lng: f64) -> Coordinate {
    Coordinate::new_unchecked(lat, lng)
}

fn step(mode: TravelMode, from: Coordinate, to: Coordinate, meters: u32) -> Step {
    let path = vec![from, to];
    Step {
        travel_mode: mode,
        distance_meters: meters,
        duration: Duration::from_secs(u64::from(meters)),
        polyline: EncodedPolyline::from_points(&path),
        path,
        instruction: None,
        start_location: Some(from),
        end_location: Some(to),
        transit_details: None,
    }
}

fn route(mode: TravelMode, steps: Vec<Step>) -> Route {
    let path: Vec<Coordinate> = steps.iter().flat_map(|s| s.path.clone()).collect();
    let distance: u32 = steps.iter().map(|s| s.distance_meters).sum();
    let duration: Duration = steps.iter().map(|s| s.duration).sum();
    Route {
        travel_mode: mode,
        distance_meters: distance,
        duration,
        polyline: EncodedPolyline::from_points(&path),
        legs: vec![Leg {
            start_location: path.first().copied(),
            end_location: path.last().copied(),
            distance_meters: distance,
            duration,
            polyline: EncodedPolyline::from_points(&path),
            path: path.clone(),
            steps,
        }],
        path,
        description: None,
        warnings: Vec::new(),
    }
}

/// Walk to Alexanderplatz, ride the U2 to Zoo, walk to the destination
pub fn transit_route() -> Route {
    let start = point(52.5200, 13.4050);
    let alex = point(52.5219, 13.4132);
    let zoo = point(52.5065, 13.3325);
    let end = point(52.5050, 13.3300);

    let mut ride = step(TravelMode::Transit, alex, zoo, 6_200);
    ride.transit_details = Some(TransitDetails {
        line_short_name: Some("U2".to_string()),
        line_color: Some("#da421e".to_string()),
        headsign: Some("Ruhleben".to_string()),
        stop_count: Some(9),
        departure_stop: Some(TransitStop {
            name: Some("Alexanderplatz".to_string()),
            location: Some(alex),
        }),
        arrival_stop: Some(TransitStop {
            name: Some("Zoologischer Garten".to_string()),
            location: Some(zoo),
        }),
        ..TransitDetails::default()
    });

    route(
        TravelMode::Transit,
        vec![
            step(TravelMode::Walk, start, alex, 600),
            ride,
            step(TravelMode::Walk, zoo, end, 250),
        ],
    )
}

/// A single walking step along Unter den Linden
pub fn walking_route() -> Route {
    route(
        TravelMode::Walk,
        vec![step(
            TravelMode::Walk,
            point(52.5163, 13.3777),
            point(52.5170, 13.3889),
            800,
        )],
    )
}

/// A bare place result at `(lat, lng)`
pub fn place(id: &str, lat: f64, lng: f64) -> PlaceResult {
    PlaceResult {
        id: id.to_string(),
        name: id.to_string(),
        formatted_address: None,
        location: point(lat, lng),
        rating: None,
        user_rating_count: None,
        types: Vec::new(),
        price_level: None,
        business_status: None,
        photos: Vec::new(),
        distance_from_center_meters: None,
    }
}
