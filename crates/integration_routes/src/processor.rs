//! Normalisation of computeRoutes payloads into the domain route model

use std::time::Duration;

use domain::{
    Coordinate, DomainError, EncodedPolyline, Leg, Route, Step, TransitDetails, TransitStop,
    TravelMode,
};
use tracing::{debug, instrument, warn};

use crate::error::RoutesError;
use crate::raw::{
    RawComputeRoutesResponse, RawLeg, RawLocation, RawPolyline, RawRoute, RawStep,
    RawTransitDetails, RawTransitStop,
};

/// Converts raw provider routes into [`Route`] values
///
/// Constructed with the travel mode of the originating request, which is
/// used for the route itself and for steps whose mode the provider omits or
/// names in a vocabulary we do not know.
#[derive(Debug, Clone, Copy)]
pub struct RouteResponseProcessor {
    fallback_mode: TravelMode,
}

impl RouteResponseProcessor {
    #[must_use]
    pub const fn new(fallback_mode: TravelMode) -> Self {
        Self { fallback_mode }
    }

    /// Parse and normalise a response body
    ///
    /// # Errors
    ///
    /// Returns `ParseError` for invalid JSON, otherwise see [`Self::process`].
    pub fn process_json(&self, body: &str) -> Result<Vec<Route>, RoutesError> {
        let raw: RawComputeRoutesResponse =
            serde_json::from_str(body).map_err(|e| RoutesError::ParseError(e.to_string()))?;
        self.process(raw)
    }

    /// Normalise every route candidate, preserving provider order
    ///
    /// # Errors
    ///
    /// - `EmptyRouteSet` if the provider returned no candidates
    /// - `Domain(Polyline)` if any polyline fails to decode
    /// - `ParseError` for a malformed duration string
    #[instrument(skip_all, fields(candidates = raw.routes.len(), mode = %self.fallback_mode))]
    pub fn process(&self, raw: RawComputeRoutesResponse) -> Result<Vec<Route>, RoutesError> {
        if raw.routes.is_empty() {
            warn!("Routing service returned no routes");
            return Err(RoutesError::EmptyRouteSet);
        }

        let routes = raw
            .routes
            .into_iter()
            .map(|route| self.convert_route(route))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(count = routes.len(), "Routes normalised");
        Ok(routes)
    }

    fn convert_route(&self, raw: RawRoute) -> Result<Route, RoutesError> {
        let (polyline, path) = decode_polyline(raw.polyline)?;
        let legs = raw
            .legs
            .into_iter()
            .map(|leg| self.convert_leg(leg))
            .collect::<Result<Vec<_>, _>>()?;

        let distance_meters = raw.distance_meters.unwrap_or_else(|| {
            saturating_u32(legs.iter().map(|leg| u64::from(leg.distance_meters)).sum())
        });

        Ok(Route {
            travel_mode: self.fallback_mode,
            distance_meters,
            duration: parse_duration(raw.duration.as_deref())?,
            polyline,
            path,
            legs,
            description: raw.description.filter(|d| !d.is_empty()),
            warnings: raw.warnings,
        })
    }

    fn convert_leg(&self, raw: RawLeg) -> Result<Leg, RoutesError> {
        let (polyline, path) = decode_polyline(raw.polyline)?;
        let steps = raw
            .steps
            .into_iter()
            .map(|step| self.convert_step(step))
            .collect::<Result<Vec<_>, _>>()?;

        let step_total: u64 = steps.iter().map(|s| u64::from(s.distance_meters)).sum();
        let distance_meters = match raw.distance_meters {
            Some(distance) => {
                if !steps.is_empty() && u64::from(distance).abs_diff(step_total) > 1 {
                    warn!(
                        leg_distance = distance,
                        step_total, "Leg distance disagrees with its steps"
                    );
                }
                distance
            },
            None => saturating_u32(step_total),
        };

        Ok(Leg {
            start_location: raw.start_location.and_then(convert_location),
            end_location: raw.end_location.and_then(convert_location),
            distance_meters,
            duration: parse_duration(raw.duration.or(raw.static_duration).as_deref())?,
            polyline,
            path,
            steps,
        })
    }

    fn convert_step(&self, raw: RawStep) -> Result<Step, RoutesError> {
        let (polyline, path) = decode_polyline(raw.polyline)?;
        let travel_mode = match raw.travel_mode.as_deref() {
            Some(mode) => TravelMode::from_provider(mode).unwrap_or_else(|| {
                debug!(mode, fallback = %self.fallback_mode, "Unknown step travel mode");
                self.fallback_mode
            }),
            None => self.fallback_mode,
        };

        let transit_details = if travel_mode.is_transit() {
            Some(raw.transit_details.map(convert_transit).unwrap_or_default())
        } else {
            if raw.transit_details.is_some() {
                debug!(%travel_mode, "Dropping transit details on non-transit step");
            }
            None
        };

        Ok(Step {
            travel_mode,
            distance_meters: raw.distance_meters.unwrap_or(0),
            duration: parse_duration(raw.static_duration.as_deref())?,
            polyline,
            path,
            instruction: raw
                .navigation_instruction
                .and_then(|n| n.instructions)
                .filter(|i| !i.is_empty()),
            start_location: raw.start_location.and_then(convert_location),
            end_location: raw.end_location.and_then(convert_location),
            transit_details,
        })
    }
}

/// Parse a provider duration such as `"1234s"` or `"12.5s"`
///
/// A missing duration is zero.
///
/// # Errors
///
/// Returns `ParseError` if the value lacks the `s` suffix or is not a
/// non-negative number.
pub fn parse_duration(value: Option<&str>) -> Result<Duration, RoutesError> {
    let Some(value) = value else {
        return Ok(Duration::ZERO);
    };

    let invalid = || RoutesError::ParseError(format!("Invalid duration: {value:?}"));
    let seconds: f64 = value
        .trim()
        .strip_suffix('s')
        .ok_or_else(invalid)?
        .parse()
        .map_err(|_| invalid())?;

    Duration::try_from_secs_f64(seconds).map_err(|_| invalid())
}

fn decode_polyline(
    raw: Option<RawPolyline>,
) -> Result<(EncodedPolyline, Vec<Coordinate>), RoutesError> {
    let polyline = EncodedPolyline::new(
        raw.and_then(|p| p.encoded_polyline)
            .unwrap_or_default(),
    );
    let path = polyline.decode().map_err(DomainError::from)?;
    Ok((polyline, path))
}

/// A location with both components in range, otherwise `None`
fn convert_location(raw: RawLocation) -> Option<Coordinate> {
    let lat_lng = raw.lat_lng?;
    let (Some(latitude), Some(longitude)) = (lat_lng.latitude, lat_lng.longitude) else {
        debug!("Dropping location without latitude or longitude");
        return None;
    };
    Coordinate::new(latitude, longitude)
        .inspect_err(|e| debug!(error = %e, "Dropping invalid provider location"))
        .ok()
}

fn convert_stop(raw: RawTransitStop) -> TransitStop {
    TransitStop {
        name: raw.name,
        location: raw.location.and_then(convert_location),
    }
}

fn convert_transit(raw: RawTransitDetails) -> TransitDetails {
    let stops = raw.stop_details.unwrap_or_default();
    let line = raw.transit_line.unwrap_or_default();

    TransitDetails {
        line_name: line.name,
        line_short_name: line.name_short,
        line_color: line.color,
        line_text_color: line.text_color,
        vehicle_type: line.vehicle.and_then(|v| v.vehicle_type),
        headsign: raw.headsign,
        stop_count: raw.stop_count,
        departure_stop: stops.departure_stop.map(convert_stop),
        arrival_stop: stops.arrival_stop.map(convert_stop),
        departure_time: stops.departure_time,
        arrival_time: stops.arrival_time,
    }
}

fn saturating_u32(value: u64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
