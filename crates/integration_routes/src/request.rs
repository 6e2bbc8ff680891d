//! computeRoutes request body
//!
//! Maps a validated [`RouteRequest`] onto the provider's JSON shape. Mode
//! exclusivity is already guaranteed by [`ModeOptions`], so this module never
//! has to drop fields.

use chrono::{DateTime, SecondsFormat, Utc};
use domain::{
    AvoidFlags, ModeOptions, RouteRequest, TimeConstraint, TransitPreferences, TravelMode,
    Waypoint,
};
use serde::Serialize;

use crate::config::RoutesConfig;

/// Response fields requested through `X-Goog-FieldMask`
pub const FIELD_MASK: &str = "routes.distanceMeters,\
routes.duration,\
routes.polyline.encodedPolyline,\
routes.description,\
routes.warnings,\
routes.legs.distanceMeters,\
routes.legs.duration,\
routes.legs.polyline.encodedPolyline,\
routes.legs.startLocation,\
routes.legs.endLocation,\
routes.legs.steps.distanceMeters,\
routes.legs.steps.staticDuration,\
routes.legs.steps.polyline.encodedPolyline,\
routes.legs.steps.travelMode,\
routes.legs.steps.navigationInstruction,\
routes.legs.steps.startLocation,\
routes.legs.steps.endLocation,\
routes.legs.steps.transitDetails";

/// JSON body of a computeRoutes call
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputeRoutesBody {
    origin: WireWaypoint,
    destination: WireWaypoint,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    intermediates: Vec<WireWaypoint>,
    travel_mode: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    routing_preference: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    route_modifiers: Option<WireRouteModifiers>,
    #[serde(skip_serializing_if = "Option::is_none")]
    transit_preferences: Option<WireTransitPreferences>,
    #[serde(skip_serializing_if = "Option::is_none")]
    departure_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    arrival_time: Option<String>,
    compute_alternative_routes: bool,
    language_code: String,
    units: String,
}

impl ComputeRoutesBody {
    /// Shape a request for the wire
    ///
    /// The provider only accepts a routing preference for motorised modes, so
    /// WALK and BICYCLE requests omit it even though the request carries one.
    #[must_use]
    pub fn from_request(request: &RouteRequest, config: &RoutesConfig) -> Self {
        let mut body = Self {
            origin: WireWaypoint::from(request.origin()),
            destination: WireWaypoint::from(request.destination()),
            intermediates: Vec::new(),
            travel_mode: request.travel_mode().as_str(),
            routing_preference: None,
            route_modifiers: None,
            transit_preferences: None,
            departure_time: None,
            arrival_time: None,
            compute_alternative_routes: config.compute_alternative_routes
                && request.compute_alternatives(),
            language_code: config.language_code.clone(),
            units: config.units.clone(),
        };

        match request.options() {
            ModeOptions::Transit(preferences) => {
                body.transit_preferences = Some(WireTransitPreferences::from(preferences));
            },
            ModeOptions::Road {
                intermediates,
                avoid,
                routing_preference,
            } => {
                body.intermediates = intermediates.iter().map(WireWaypoint::from).collect();
                if !avoid.is_empty() {
                    body.route_modifiers = Some(WireRouteModifiers::from(*avoid));
                }
                if matches!(
                    request.travel_mode(),
                    TravelMode::Drive | TravelMode::TwoWheeler
                ) {
                    body.routing_preference = Some(routing_preference.as_str());
                }
            },
        }

        match request.time() {
            Some(TimeConstraint::DepartAt(time)) => body.departure_time = Some(timestamp(time)),
            Some(TimeConstraint::ArriveBy(time)) => body.arrival_time = Some(timestamp(time)),
            None => {},
        }

        body
    }
}

fn timestamp(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireWaypoint {
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<WireLocation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    place_id: Option<String>,
}

impl From<&Waypoint> for WireWaypoint {
    fn from(waypoint: &Waypoint) -> Self {
        let mut wire = Self {
            location: None,
            address: None,
            place_id: None,
        };
        match waypoint {
            Waypoint::Coordinate(c) => {
                wire.location = Some(WireLocation {
                    lat_lng: WireLatLng {
                        latitude: c.lat(),
                        longitude: c.lng(),
                    },
                });
            },
            Waypoint::Address(address) => wire.address = Some(address.clone()),
            Waypoint::PlaceId(id) => wire.place_id = Some(id.clone()),
        }
        wire
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireLocation {
    lat_lng: WireLatLng,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct WireLatLng {
    latitude: f64,
    longitude: f64,
}

#[allow(clippy::struct_excessive_bools)] // Mirrors the provider's flag object
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireRouteModifiers {
    avoid_tolls: bool,
    avoid_highways: bool,
    avoid_ferries: bool,
    avoid_indoor: bool,
}

impl From<AvoidFlags> for WireRouteModifiers {
    fn from(flags: AvoidFlags) -> Self {
        Self {
            avoid_tolls: flags.tolls,
            avoid_highways: flags.highways,
            avoid_ferries: flags.ferries,
            avoid_indoor: flags.indoor,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireTransitPreferences {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    allowed_travel_modes: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    routing_preference: Option<&'static str>,
}

impl From<&TransitPreferences> for WireTransitPreferences {
    fn from(preferences: &TransitPreferences) -> Self {
        Self {
            allowed_travel_modes: preferences
                .allowed_modes
                .iter()
                .map(|mode| mode.as_str())
                .collect(),
            routing_preference: preferences.routing_preference.map(|p| p.as_str()),
        }
    }
}
