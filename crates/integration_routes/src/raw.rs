//! Raw computeRoutes response types
//!
//! Mirrors the provider JSON closely. The provider omits fields holding their
//! zero value, so nearly everything is optional or defaulted here and the
//! [`RouteResponseProcessor`](crate::RouteResponseProcessor) decides what a
//! missing field means.

use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawComputeRoutesResponse {
    #[serde(default)]
    pub routes: Vec<RawRoute>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRoute {
    pub distance_meters: Option<u32>,
    /// Duration string such as `"1234s"`
    pub duration: Option<String>,
    pub polyline: Option<RawPolyline>,
    pub description: Option<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(default)]
    pub legs: Vec<RawLeg>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPolyline {
    pub encoded_polyline: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLeg {
    pub distance_meters: Option<u32>,
    pub duration: Option<String>,
    pub static_duration: Option<String>,
    pub polyline: Option<RawPolyline>,
    pub start_location: Option<RawLocation>,
    pub end_location: Option<RawLocation>,
    #[serde(default)]
    pub steps: Vec<RawStep>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLocation {
    pub lat_lng: Option<RawLatLng>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct RawLatLng {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStep {
    pub distance_meters: Option<u32>,
    pub static_duration: Option<String>,
    pub polyline: Option<RawPolyline>,
    pub travel_mode: Option<String>,
    pub navigation_instruction: Option<RawNavigationInstruction>,
    pub start_location: Option<RawLocation>,
    pub end_location: Option<RawLocation>,
    pub transit_details: Option<RawTransitDetails>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawNavigationInstruction {
    pub maneuver: Option<String>,
    pub instructions: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTransitDetails {
    pub stop_details: Option<RawStopDetails>,
    pub headsign: Option<String>,
    pub stop_count: Option<u32>,
    pub transit_line: Option<RawTransitLine>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStopDetails {
    pub arrival_stop: Option<RawTransitStop>,
    pub arrival_time: Option<DateTime<Utc>>,
    pub departure_stop: Option<RawTransitStop>,
    pub departure_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTransitStop {
    pub name: Option<String>,
    pub location: Option<RawLocation>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTransitLine {
    pub name: Option<String>,
    pub name_short: Option<String>,
    pub color: Option<String>,
    pub text_color: Option<String>,
    pub vehicle: Option<RawTransitVehicle>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTransitVehicle {
    #[serde(rename = "type")]
    pub vehicle_type: Option<String>,
    pub name: Option<RawLocalizedText>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawLocalizedText {
    pub text: Option<String>,
}
