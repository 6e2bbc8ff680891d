//! Normalized route model
//!
//! Provider responses are converted into these types once; everything
//! downstream (classification, selection, rendering) works on them only.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::geo::EncodedPolyline;
use crate::value_objects::{Coordinate, TravelMode};

/// Allowed difference between a leg's distance and the sum of its steps
const LEG_DISTANCE_TOLERANCE_METERS: u64 = 1;

/// One route alternative from origin to destination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Mode the route was requested with
    pub travel_mode: TravelMode,
    /// Total distance in meters
    pub distance_meters: u32,
    /// Total travel time
    pub duration: Duration,
    /// Encoded overview path
    pub polyline: EncodedPolyline,
    /// Decoded overview path
    pub path: Vec<Coordinate>,
    /// Legs between origin, intermediates and destination
    pub legs: Vec<Leg>,
    /// Provider's short label (e.g. "via A100")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Warnings to show alongside the route
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl Route {
    /// All steps across all legs, in travel order
    pub fn steps(&self) -> impl Iterator<Item = &Step> {
        self.legs.iter().flat_map(|leg| leg.steps.iter())
    }

    /// Total duration in whole minutes (rounded up)
    #[must_use]
    pub fn duration_minutes(&self) -> u64 {
        self.duration.as_secs().div_ceil(60)
    }

    /// Number of transfers (transit steps - 1)
    #[must_use]
    pub fn transfers(&self) -> u8 {
        let rides = self.steps().filter(|step| step.is_transit()).count();
        rides.saturating_sub(1).min(usize::from(u8::MAX)) as u8
    }

    /// Line labels of every transit ride, in order
    #[must_use]
    pub fn transit_lines(&self) -> Vec<&str> {
        self.steps()
            .filter_map(|step| step.transit_details.as_ref())
            .filter_map(TransitDetails::line_label)
            .collect()
    }
}

/// Section of a route between two stop-off points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leg {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_location: Option<Coordinate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_location: Option<Coordinate>,
    pub distance_meters: u32,
    pub duration: Duration,
    pub polyline: EncodedPolyline,
    pub path: Vec<Coordinate>,
    pub steps: Vec<Step>,
}

impl Leg {
    /// Sum of the step distances in meters
    #[must_use]
    pub fn step_distance_total(&self) -> u64 {
        self.steps
            .iter()
            .map(|step| u64::from(step.distance_meters))
            .sum()
    }

    /// Whether the leg distance agrees with its steps (within one meter)
    ///
    /// A leg without steps is trivially consistent.
    #[must_use]
    pub fn distance_matches_steps(&self) -> bool {
        self.steps.is_empty()
            || self
                .step_distance_total()
                .abs_diff(u64::from(self.distance_meters))
                <= LEG_DISTANCE_TOLERANCE_METERS
    }
}

/// A single-mode movement within a leg
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub travel_mode: TravelMode,
    pub distance_meters: u32,
    pub duration: Duration,
    pub polyline: EncodedPolyline,
    pub path: Vec<Coordinate>,
    /// Navigation instruction ("Turn left onto ...")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instruction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_location: Option<Coordinate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_location: Option<Coordinate>,
    /// Present if and only if `travel_mode` is `Transit`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transit_details: Option<TransitDetails>,
}

impl Step {
    /// Whether this step is a transit ride
    #[must_use]
    pub const fn is_transit(&self) -> bool {
        self.travel_mode.is_transit()
    }
}

/// Transit-specific information of a ride step
///
/// Every field is optional: whatever the provider omitted stays `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransitDetails {
    pub line_name: Option<String>,
    pub line_short_name: Option<String>,
    /// Line color as `#RRGGBB`
    pub line_color: Option<String>,
    pub line_text_color: Option<String>,
    /// Vehicle category (`BUS`, `SUBWAY`, `HEAVY_RAIL`, ...)
    pub vehicle_type: Option<String>,
    pub headsign: Option<String>,
    pub stop_count: Option<u32>,
    pub departure_stop: Option<TransitStop>,
    pub arrival_stop: Option<TransitStop>,
    pub departure_time: Option<DateTime<Utc>>,
    pub arrival_time: Option<DateTime<Utc>>,
}

impl TransitDetails {
    /// Short line name if known, otherwise the full name
    #[must_use]
    pub fn line_label(&self) -> Option<&str> {
        self.line_short_name
            .as_deref()
            .or(self.line_name.as_deref())
    }
}

/// A boarding or alighting stop
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransitStop {
    pub name: Option<String>,
    pub location: Option<Coordinate>,
}
