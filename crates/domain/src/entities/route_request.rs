//! Mode-aware route request
//!
//! [`RouteRequestBuilder`] collects loosely typed input and validates it into
//! a [`RouteRequest`] whose [`ModeOptions`] make mode-invalid combinations
//! unrepresentable: transit preferences exist only for TRANSIT, intermediates,
//! avoidance flags and the routing preference only for the other modes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;
use crate::geo;
use crate::value_objects::{Coordinate, TravelMode};

/// Straight-line origin/destination distance above which no request is issued
pub const MAX_ROUTE_DISTANCE_METERS: f64 = 1_000_000.0;

/// A place a route starts at, passes through or ends at
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Waypoint {
    /// Resolved coordinate
    Coordinate(Coordinate),
    /// Free-form address resolved by the provider
    Address(String),
    /// Provider place id
    PlaceId(String),
}

impl Waypoint {
    /// The coordinate, if this waypoint is already resolved
    #[must_use]
    pub const fn coordinate(&self) -> Option<Coordinate> {
        match self {
            Self::Coordinate(c) => Some(*c),
            Self::Address(_) | Self::PlaceId(_) => None,
        }
    }

    fn validate(&self, role: &str) -> Result<(), DomainError> {
        match self {
            Self::Coordinate(c) if !c.is_valid() => Err(DomainError::InvalidCoordinates {
                latitude: c.lat(),
                longitude: c.lng(),
            }),
            Self::Address(s) | Self::PlaceId(s) if s.trim().is_empty() => Err(
                DomainError::ValidationError(format!("{role} must not be empty")),
            ),
            _ => Ok(()),
        }
    }
}

impl From<Coordinate> for Waypoint {
    fn from(c: Coordinate) -> Self {
        Self::Coordinate(c)
    }
}

/// Road features to avoid (non-transit modes only)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvoidFlags {
    pub tolls: bool,
    pub highways: bool,
    pub ferries: bool,
    pub indoor: bool,
}

impl AvoidFlags {
    /// Parse feature names such as `["tolls", "ferries"]`
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for an unknown feature name.
    pub fn from_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Result<Self, DomainError> {
        let mut flags = Self::default();
        for name in names {
            match name.trim().to_ascii_lowercase().as_str() {
                "tolls" => flags.tolls = true,
                "highways" => flags.highways = true,
                "ferries" => flags.ferries = true,
                "indoor" => flags.indoor = true,
                other => {
                    return Err(DomainError::ValidationError(format!(
                        "Unknown avoid feature: {other}"
                    )));
                },
            }
        }
        Ok(flags)
    }

    /// Whether no feature is avoided
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        !(self.tolls || self.highways || self.ferries || self.indoor)
    }
}

/// Traffic handling for non-transit routes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoutingPreference {
    TrafficUnaware,
    TrafficAware,
    TrafficAwareOptimal,
}

impl RoutingPreference {
    /// Default preference for a non-transit mode
    #[must_use]
    pub const fn default_for(mode: TravelMode) -> Self {
        match mode {
            TravelMode::Drive | TravelMode::TwoWheeler => Self::TrafficAware,
            TravelMode::Walk | TravelMode::Bicycle | TravelMode::Transit => Self::TrafficUnaware,
        }
    }

    /// Wire name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TrafficUnaware => "TRAFFIC_UNAWARE",
            Self::TrafficAware => "TRAFFIC_AWARE",
            Self::TrafficAwareOptimal => "TRAFFIC_AWARE_OPTIMAL",
        }
    }
}

/// Transit vehicle categories a rider accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransitSubMode {
    Bus,
    Subway,
    Train,
    LightRail,
    Rail,
}

impl TransitSubMode {
    /// Wire name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Bus => "BUS",
            Self::Subway => "SUBWAY",
            Self::Train => "TRAIN",
            Self::LightRail => "LIGHT_RAIL",
            Self::Rail => "RAIL",
        }
    }
}

/// Trade-off between walking and changing vehicles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransitRoutingPreference {
    LessWalking,
    FewerTransfers,
}

impl TransitRoutingPreference {
    /// Wire name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::LessWalking => "LESS_WALKING",
            Self::FewerTransfers => "FEWER_TRANSFERS",
        }
    }
}

/// Preferences that apply to TRANSIT requests only
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitPreferences {
    /// Accepted vehicle categories (empty = provider default, all)
    pub allowed_modes: Vec<TransitSubMode>,
    pub routing_preference: Option<TransitRoutingPreference>,
}

/// When the trip should happen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeConstraint {
    DepartAt(DateTime<Utc>),
    ArriveBy(DateTime<Utc>),
}

/// Options that depend on the travel mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ModeOptions {
    Transit(TransitPreferences),
    Road {
        intermediates: Vec<Waypoint>,
        avoid: AvoidFlags,
        routing_preference: RoutingPreference,
    },
}

/// A validated request to the routing provider
///
/// Deserialization goes through [`RouteRequestBuilder::build`], so a decoded
/// request carries the same guarantees as a built one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RouteRequestFields")]
pub struct RouteRequest {
    origin: Waypoint,
    destination: Waypoint,
    travel_mode: TravelMode,
    options: ModeOptions,
    time: Option<TimeConstraint>,
    compute_alternatives: bool,
}

impl RouteRequest {
    /// Start building a request
    pub fn builder(
        origin: impl Into<Waypoint>,
        destination: impl Into<Waypoint>,
        travel_mode: TravelMode,
    ) -> RouteRequestBuilder {
        RouteRequestBuilder::new(origin, destination, travel_mode)
    }

    #[must_use]
    pub const fn origin(&self) -> &Waypoint {
        &self.origin
    }

    #[must_use]
    pub const fn destination(&self) -> &Waypoint {
        &self.destination
    }

    #[must_use]
    pub const fn travel_mode(&self) -> TravelMode {
        self.travel_mode
    }

    #[must_use]
    pub const fn options(&self) -> &ModeOptions {
        &self.options
    }

    #[must_use]
    pub const fn time(&self) -> Option<TimeConstraint> {
        self.time
    }

    /// Whether the provider should return alternative routes
    #[must_use]
    pub const fn compute_alternatives(&self) -> bool {
        self.compute_alternatives
    }

    /// Intermediate waypoints (always empty for transit)
    #[must_use]
    pub fn intermediates(&self) -> &[Waypoint] {
        match &self.options {
            ModeOptions::Road { intermediates, .. } => intermediates,
            ModeOptions::Transit(_) => &[],
        }
    }
}

/// Unvalidated wire shape of a [`RouteRequest`]
#[derive(Deserialize)]
struct RouteRequestFields {
    origin: Waypoint,
    destination: Waypoint,
    travel_mode: TravelMode,
    options: ModeOptions,
    #[serde(default)]
    time: Option<TimeConstraint>,
    #[serde(default = "default_compute_alternatives")]
    compute_alternatives: bool,
}

const fn default_compute_alternatives() -> bool {
    true
}

impl TryFrom<RouteRequestFields> for RouteRequest {
    type Error = DomainError;

    fn try_from(fields: RouteRequestFields) -> Result<Self, Self::Error> {
        let mut builder = RouteRequestBuilder::new(
            fields.origin,
            fields.destination,
            fields.travel_mode,
        )
        .compute_alternatives(fields.compute_alternatives);

        builder = match fields.options {
            ModeOptions::Transit(preferences) => builder.transit_preferences(preferences),
            ModeOptions::Road {
                intermediates,
                avoid,
                routing_preference,
            } => builder
                .intermediates(intermediates)
                .avoid(avoid)
                .routing_preference(routing_preference),
        };

        builder = match fields.time {
            Some(TimeConstraint::DepartAt(time)) => builder.departure_time(time),
            Some(TimeConstraint::ArriveBy(time)) => builder.arrival_time(time),
            None => builder,
        };

        builder.build()
    }
}

/// Collects route request input and validates it on [`build`](Self::build)
#[derive(Debug, Clone)]
pub struct RouteRequestBuilder {
    origin: Waypoint,
    destination: Waypoint,
    travel_mode: TravelMode,
    intermediates: Vec<Waypoint>,
    avoid: AvoidFlags,
    routing_preference: Option<RoutingPreference>,
    transit_preferences: Option<TransitPreferences>,
    departure_time: Option<DateTime<Utc>>,
    arrival_time: Option<DateTime<Utc>>,
    compute_alternatives: bool,
}

impl RouteRequestBuilder {
    /// Create a builder; alternatives are requested by default
    pub fn new(
        origin: impl Into<Waypoint>,
        destination: impl Into<Waypoint>,
        travel_mode: TravelMode,
    ) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            travel_mode,
            intermediates: Vec::new(),
            avoid: AvoidFlags::default(),
            routing_preference: None,
            transit_preferences: None,
            departure_time: None,
            arrival_time: None,
            compute_alternatives: true,
        }
    }

    /// Add an intermediate waypoint
    #[must_use]
    pub fn intermediate(mut self, waypoint: impl Into<Waypoint>) -> Self {
        self.intermediates.push(waypoint.into());
        self
    }

    /// Add several intermediate waypoints
    #[must_use]
    pub fn intermediates(mut self, waypoints: impl IntoIterator<Item = Waypoint>) -> Self {
        self.intermediates.extend(waypoints);
        self
    }

    /// Set the features to avoid
    #[must_use]
    pub const fn avoid(mut self, avoid: AvoidFlags) -> Self {
        self.avoid = avoid;
        self
    }

    /// Override the traffic preference
    #[must_use]
    pub const fn routing_preference(mut self, preference: RoutingPreference) -> Self {
        self.routing_preference = Some(preference);
        self
    }

    /// Set transit preferences
    #[must_use]
    pub fn transit_preferences(mut self, preferences: TransitPreferences) -> Self {
        self.transit_preferences = Some(preferences);
        self
    }

    /// Depart at the given time
    #[must_use]
    pub const fn departure_time(mut self, time: DateTime<Utc>) -> Self {
        self.departure_time = Some(time);
        self
    }

    /// Arrive by the given time (transit only)
    #[must_use]
    pub const fn arrival_time(mut self, time: DateTime<Utc>) -> Self {
        self.arrival_time = Some(time);
        self
    }

    /// Whether to request alternative routes
    #[must_use]
    pub const fn compute_alternatives(mut self, enabled: bool) -> Self {
        self.compute_alternatives = enabled;
        self
    }

    /// Validate and produce the request
    ///
    /// The distance guard runs first, so an over-long request is rejected
    /// before any other check and before anything reaches the network.
    ///
    /// # Errors
    ///
    /// - `DistanceLimitExceeded` if origin and destination are coordinates
    ///   more than [`MAX_ROUTE_DISTANCE_METERS`] apart
    /// - `InvalidCoordinates` / `ValidationError` for malformed waypoints
    /// - `InvalidRouteRequest` for fields not defined for the travel mode
    pub fn build(self) -> Result<RouteRequest, DomainError> {
        self.origin.validate("origin")?;
        self.destination.validate("destination")?;

        if let (Some(from), Some(to)) = (self.origin.coordinate(), self.destination.coordinate()) {
            let distance = geo::distance_meters(&from, &to);
            if distance > MAX_ROUTE_DISTANCE_METERS {
                return Err(DomainError::DistanceLimitExceeded {
                    distance_meters: distance,
                    limit_meters: MAX_ROUTE_DISTANCE_METERS,
                });
            }
        }

        for waypoint in &self.intermediates {
            waypoint.validate("intermediate waypoint")?;
        }

        if self.departure_time.is_some() && self.arrival_time.is_some() {
            return Err(DomainError::invalid_request(
                "set either a departure time or an arrival time, not both",
            ));
        }

        let time = self
            .departure_time
            .map(TimeConstraint::DepartAt)
            .or_else(|| self.arrival_time.map(TimeConstraint::ArriveBy));

        let options = if self.travel_mode.is_transit() {
            if !self.intermediates.is_empty() {
                return Err(DomainError::invalid_request(
                    "intermediate waypoints are not supported for TRANSIT",
                ));
            }
            if !self.avoid.is_empty() {
                return Err(DomainError::invalid_request(
                    "avoid modifiers are not supported for TRANSIT",
                ));
            }
            if self.routing_preference.is_some() {
                return Err(DomainError::invalid_request(
                    "routing preference is not supported for TRANSIT",
                ));
            }
            ModeOptions::Transit(self.transit_preferences.unwrap_or_default())
        } else {
            if self.transit_preferences.is_some() {
                return Err(DomainError::invalid_request(format!(
                    "transit preferences are not supported for {}",
                    self.travel_mode.as_str()
                )));
            }
            if self.arrival_time.is_some() {
                return Err(DomainError::invalid_request(format!(
                    "arrival time is not supported for {}",
                    self.travel_mode.as_str()
                )));
            }
            ModeOptions::Road {
                routing_preference: self
                    .routing_preference
                    .unwrap_or(RoutingPreference::default_for(self.travel_mode)),
                intermediates: self.intermediates,
                avoid: self.avoid,
            }
        };

        // The provider cannot compute alternatives for routes with intermediates
        let compute_alternatives = self.compute_alternatives
            && !matches!(&options, ModeOptions::Road { intermediates, .. } if !intermediates.is_empty());

        Ok(RouteRequest {
            origin: self.origin,
            destination: self.destination,
            travel_mode: self.travel_mode,
            options,
            time,
            compute_alternatives,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn times_square() -> Coordinate {
        Coordinate::new_unchecked(40.758, -73.9855)
    }

    fn central_park() -> Coordinate {
        Coordinate::new_unchecked(40.7829, -73.9654)
    }

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 4, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_distance_guard_rejects_far_destination() {
        let result = RouteRequest::builder(
            Coordinate::new_unchecked(0.0, 0.0),
            Coordinate::new_unchecked(0.0, 170.0),
            TravelMode::Drive,
        )
        .build();

        match result {
            Err(DomainError::DistanceLimitExceeded {
                distance_meters,
                limit_meters,
            }) => {
                assert!(distance_meters > 18_000_000.0);
                assert!((limit_meters - MAX_ROUTE_DISTANCE_METERS).abs() < f64::EPSILON);
            },
            other => unreachable!("Expected DistanceLimitExceeded, got {other:?}"),
        }
    }

    #[test]
    fn test_distance_guard_runs_before_mode_checks() {
        let result = RouteRequest::builder(
            Coordinate::new_unchecked(0.0, 0.0),
            Coordinate::new_unchecked(0.0, 170.0),
            TravelMode::Transit,
        )
        .intermediate(central_park())
        .build();
        assert!(matches!(
            result,
            Err(DomainError::DistanceLimitExceeded { .. })
        ));
    }

    #[test]
    fn test_distance_guard_skipped_for_addresses() {
        let request = RouteRequest::builder(
            Waypoint::Address("Lisbon".to_string()),
            Waypoint::Address("Vladivostok".to_string()),
            TravelMode::Drive,
        )
        .build();
        assert!(request.is_ok());
    }

    #[test]
    fn test_transit_rejects_intermediates() {
        let result = RouteRequest::builder(times_square(), central_park(), TravelMode::Transit)
            .intermediate(Waypoint::Address("Bryant Park".to_string()))
            .build();
        assert!(matches!(result, Err(DomainError::InvalidRouteRequest(_))));
    }

    #[test]
    fn test_transit_rejects_avoid_flags() {
        let result = RouteRequest::builder(times_square(), central_park(), TravelMode::Transit)
            .avoid(AvoidFlags {
                tolls: true,
                ..AvoidFlags::default()
            })
            .build();
        assert!(matches!(result, Err(DomainError::InvalidRouteRequest(_))));
    }

    #[test]
    fn test_transit_rejects_routing_preference() {
        let result = RouteRequest::builder(times_square(), central_park(), TravelMode::Transit)
            .routing_preference(RoutingPreference::TrafficAware)
            .build();
        assert!(matches!(result, Err(DomainError::InvalidRouteRequest(_))));
    }

    #[test]
    fn test_transit_request_shape() {
        let prefs = TransitPreferences {
            allowed_modes: vec![TransitSubMode::Subway, TransitSubMode::Bus],
            routing_preference: Some(TransitRoutingPreference::LessWalking),
        };
        let request = RouteRequest::builder(times_square(), central_park(), TravelMode::Transit)
            .transit_preferences(prefs.clone())
            .arrival_time(at(9))
            .build()
            .unwrap();

        assert_eq!(request.options(), &ModeOptions::Transit(prefs));
        assert_eq!(request.time(), Some(TimeConstraint::ArriveBy(at(9))));
        assert!(request.intermediates().is_empty());
    }

    #[test]
    fn test_both_times_rejected() {
        let result = RouteRequest::builder(times_square(), central_park(), TravelMode::Transit)
            .departure_time(at(8))
            .arrival_time(at(9))
            .build();
        assert!(matches!(result, Err(DomainError::InvalidRouteRequest(_))));
    }

    #[test]
    fn test_road_rejects_transit_preferences() {
        let result = RouteRequest::builder(times_square(), central_park(), TravelMode::Drive)
            .transit_preferences(TransitPreferences::default())
            .build();
        assert!(matches!(result, Err(DomainError::InvalidRouteRequest(_))));
    }

    #[test]
    fn test_road_rejects_arrival_time() {
        let result = RouteRequest::builder(times_square(), central_park(), TravelMode::Walk)
            .arrival_time(at(9))
            .build();
        assert!(matches!(result, Err(DomainError::InvalidRouteRequest(_))));
    }

    #[test]
    fn test_road_request_defaults() {
        let request = RouteRequest::builder(times_square(), central_park(), TravelMode::Drive)
            .departure_time(at(8))
            .build()
            .unwrap();

        match request.options() {
            ModeOptions::Road {
                intermediates,
                avoid,
                routing_preference,
            } => {
                assert!(intermediates.is_empty());
                assert!(avoid.is_empty());
                assert_eq!(*routing_preference, RoutingPreference::TrafficAware);
            },
            ModeOptions::Transit(_) => unreachable!("Expected road options"),
        }
        assert!(request.compute_alternatives());
        assert_eq!(request.time(), Some(TimeConstraint::DepartAt(at(8))));
    }

    #[test]
    fn test_walk_defaults_to_traffic_unaware() {
        let request = RouteRequest::builder(times_square(), central_park(), TravelMode::Walk)
            .build()
            .unwrap();
        assert!(matches!(
            request.options(),
            ModeOptions::Road {
                routing_preference: RoutingPreference::TrafficUnaware,
                ..
            }
        ));
    }

    #[test]
    fn test_intermediates_disable_alternatives() {
        let request = RouteRequest::builder(times_square(), central_park(), TravelMode::Drive)
            .intermediate(Waypoint::PlaceId("ChIJ4zGFAZpYwokRGUGph3Mf37k".to_string()))
            .build()
            .unwrap();
        assert_eq!(request.intermediates().len(), 1);
        assert!(!request.compute_alternatives());
    }

    #[test]
    fn test_invalid_waypoints_rejected() {
        let result = RouteRequest::builder(
            Waypoint::Address("   ".to_string()),
            central_park(),
            TravelMode::Drive,
        )
        .build();
        assert!(matches!(result, Err(DomainError::ValidationError(_))));

        let result = RouteRequest::builder(
            Coordinate::new_unchecked(123.0, 0.0),
            central_park(),
            TravelMode::Drive,
        )
        .build();
        assert!(matches!(
            result,
            Err(DomainError::InvalidCoordinates { .. })
        ));
    }

    #[test]
    fn test_deserialize_accepts_built_request() {
        let request = RouteRequest::builder(times_square(), central_park(), TravelMode::Transit)
            .departure_time(at(8))
            .build()
            .unwrap();

        let json = serde_json::to_value(&request).unwrap();
        let decoded: RouteRequest = serde_json::from_value(json).unwrap();

        assert_eq!(decoded, request);
    }

    #[test]
    fn test_deserialize_enforces_distance_guard() {
        let request = RouteRequest::builder(times_square(), central_park(), TravelMode::Drive)
            .build()
            .unwrap();
        let mut json = serde_json::to_value(&request).unwrap();
        json["destination"] = serde_json::json!({ "coordinate": { "lat": 0.0, "lng": 170.0 } });

        let err = serde_json::from_value::<RouteRequest>(json).unwrap_err();
        assert!(err.to_string().contains("exceeds"), "{err}");
    }

    #[test]
    fn test_deserialize_rejects_options_of_other_mode() {
        let request = RouteRequest::builder(times_square(), central_park(), TravelMode::Drive)
            .build()
            .unwrap();
        let mut json = serde_json::to_value(&request).unwrap();
        json["options"] = serde_json::to_value(ModeOptions::Transit(TransitPreferences::default()))
            .unwrap();

        assert!(serde_json::from_value::<RouteRequest>(json).is_err());
    }

    #[test]
    fn test_avoid_flags_from_names() {
        let flags = AvoidFlags::from_names(["tolls", "Ferries"]).unwrap();
        assert!(flags.tolls);
        assert!(flags.ferries);
        assert!(!flags.highways);
        assert!(!flags.is_empty());
        assert!(AvoidFlags::from_names(["potholes"]).is_err());
        assert!(AvoidFlags::from_names(Vec::<&str>::new()).unwrap().is_empty());
    }
}
