//! Entities - Route, request and place models shared across layers

mod place;
mod route;
mod route_request;

pub use place::{
    AreaConstraint, MAX_PLACE_RESULTS, PlaceDetails, PlaceQuery, PlaceResult, PlaceSearchRequest,
    PriceLevel,
};
pub use route::{Leg, Route, Step, TransitDetails, TransitStop};
pub use route_request::{
    AvoidFlags, MAX_ROUTE_DISTANCE_METERS, ModeOptions, RouteRequest, RouteRequestBuilder,
    RoutingPreference, TimeConstraint, TransitPreferences, TransitRoutingPreference,
    TransitSubMode, Waypoint,
};
