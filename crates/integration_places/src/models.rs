//! Places API wire types and conversion into domain places

use domain::{
    AreaConstraint, Coordinate, PlaceDetails, PlaceQuery, PlaceResult, PlaceSearchRequest,
    PriceLevel, SearchBoundary,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::error::PlacesError;

/// Fields requested for text and nearby searches
pub const SEARCH_FIELD_MASK: &str = "places.id,places.displayName,places.formattedAddress,\
places.location,places.rating,places.userRatingCount,places.types,places.priceLevel,\
places.businessStatus,places.photos";

/// Fields requested for a details lookup
pub const DETAILS_FIELD_MASK: &str = "id,displayName,formattedAddress,location,rating,\
userRatingCount,types,priceLevel,businessStatus,photos,websiteUri,nationalPhoneNumber,\
regularOpeningHours";

// --- Request bodies ---

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SearchTextBody {
    text_query: String,
    max_result_count: u8,
    language_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    location_bias: Option<WireArea>,
    #[serde(skip_serializing_if = "Option::is_none")]
    location_restriction: Option<WireArea>,
    #[serde(skip_serializing_if = "Option::is_none")]
    included_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    min_rating: Option<f32>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    open_now: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SearchNearbyBody {
    included_types: Vec<String>,
    max_result_count: u8,
    language_code: String,
    location_restriction: WireArea,
}

/// Circle or rectangle; the provider accepts rectangles only as text search restrictions
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
enum WireArea {
    Circle { center: WireLatLng, radius: f64 },
    Rectangle { low: WireLatLng, high: WireLatLng },
}

impl WireArea {
    fn circle(boundary: &SearchBoundary) -> Self {
        Self::Circle {
            center: WireLatLng::from(boundary.center()),
            radius: boundary.radius_meters(),
        }
    }

    fn rectangle(boundary: &SearchBoundary) -> Self {
        let bbox = boundary.bounding_box();
        Self::Rectangle {
            low: WireLatLng::from(bbox.south_west()),
            high: WireLatLng::from(bbox.north_east()),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
struct WireLatLng {
    latitude: f64,
    longitude: f64,
}

impl From<Coordinate> for WireLatLng {
    fn from(c: Coordinate) -> Self {
        Self {
            latitude: c.lat(),
            longitude: c.lng(),
        }
    }
}

impl SearchTextBody {
    /// Build a text search body; `max_result_count` is capped by config
    pub(crate) fn new(
        request: &PlaceSearchRequest,
        max_result_count: u8,
        language_code: &str,
    ) -> Result<Self, PlacesError> {
        request.validate()?;
        let PlaceQuery::Text(text) = &request.query else {
            return Err(PlacesError::ConfigurationError(
                "search_text needs a text query".to_string(),
            ));
        };

        let (location_bias, location_restriction) = match request.constraint {
            AreaConstraint::Bias => (Some(WireArea::circle(&request.boundary)), None),
            AreaConstraint::Restriction => (None, Some(WireArea::rectangle(&request.boundary))),
        };

        Ok(Self {
            text_query: text.trim().to_string(),
            max_result_count: request.max_result_count.min(max_result_count),
            language_code: language_code.to_string(),
            location_bias,
            location_restriction,
            included_type: request.included_type.clone(),
            min_rating: request.min_rating,
            open_now: request.open_now,
        })
    }
}

impl SearchNearbyBody {
    /// Build a nearby search body; always a circular restriction
    pub(crate) fn new(
        request: &PlaceSearchRequest,
        max_result_count: u8,
        language_code: &str,
    ) -> Result<Self, PlacesError> {
        request.validate()?;
        let PlaceQuery::Types(types) = &request.query else {
            return Err(PlacesError::ConfigurationError(
                "search_nearby needs place types".to_string(),
            ));
        };

        Ok(Self {
            included_types: types.clone(),
            max_result_count: request.max_result_count.min(max_result_count),
            language_code: language_code.to_string(),
            location_restriction: WireArea::circle(&request.boundary),
        })
    }
}

// --- Raw API response types for deserialization ---

#[derive(Debug, Deserialize)]
pub(crate) struct RawSearchResponse {
    #[serde(default)]
    places: Vec<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawPlace {
    id: Option<String>,
    display_name: Option<RawLocalizedText>,
    formatted_address: Option<String>,
    location: Option<RawLatLng>,
    rating: Option<f32>,
    user_rating_count: Option<u32>,
    #[serde(default)]
    types: Vec<String>,
    price_level: Option<String>,
    business_status: Option<String>,
    #[serde(default)]
    photos: Vec<RawPhoto>,
    website_uri: Option<String>,
    national_phone_number: Option<String>,
    regular_opening_hours: Option<RawOpeningHours>,
}

#[derive(Debug, Deserialize)]
struct RawLocalizedText {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawLatLng {
    #[serde(default)]
    latitude: f64,
    #[serde(default)]
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct RawPhoto {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawOpeningHours {
    #[serde(default)]
    weekday_descriptions: Vec<String>,
}

/// Parse a search response, skipping places that cannot be converted
pub(crate) fn parse_search_response(
    body: &str,
    max_photos: usize,
) -> Result<Vec<PlaceResult>, PlacesError> {
    let raw: RawSearchResponse =
        serde_json::from_str(body).map_err(|e| PlacesError::ParseError(e.to_string()))?;

    Ok(raw
        .places
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| {
            serde_json::from_value::<RawPlace>(value)
                .map_err(|e| e.to_string())
                .and_then(|place| convert_place(place, max_photos))
                .inspect_err(|reason| warn!(index, %reason, "Skipping malformed place"))
                .ok()
        })
        .collect())
}

/// Parse a details response
pub(crate) fn parse_details_response(
    body: &str,
    max_photos: usize,
) -> Result<PlaceDetails, PlacesError> {
    let mut raw: RawPlace =
        serde_json::from_str(body).map_err(|e| PlacesError::ParseError(e.to_string()))?;

    let website_uri = raw.website_uri.take();
    let phone_number = raw.national_phone_number.take();
    let opening_hours = raw
        .regular_opening_hours
        .take()
        .map(|h| h.weekday_descriptions)
        .unwrap_or_default();
    let place = convert_place(raw, max_photos).map_err(PlacesError::ParseError)?;

    Ok(PlaceDetails {
        place,
        website_uri,
        phone_number,
        opening_hours,
    })
}

/// Convert a raw place; id and a valid location are required
fn convert_place(raw: RawPlace, max_photos: usize) -> Result<PlaceResult, String> {
    let id = raw
        .id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| "missing id".to_string())?;
    let location = raw
        .location
        .ok_or_else(|| format!("place {id} has no location"))?;
    let location = Coordinate::new(location.latitude, location.longitude)
        .map_err(|e| format!("place {id}: {e}"))?;

    let name = raw
        .display_name
        .and_then(|n| n.text)
        .unwrap_or_else(|| id.clone());

    Ok(PlaceResult {
        name,
        formatted_address: raw.formatted_address,
        location,
        rating: raw.rating,
        user_rating_count: raw.user_rating_count,
        types: raw.types,
        price_level: raw.price_level.as_deref().and_then(PriceLevel::from_provider),
        business_status: raw.business_status,
        photos: raw
            .photos
            .into_iter()
            .filter_map(|p| p.name)
            .take(max_photos)
            .collect(),
        distance_from_center_meters: None,
        id,
    })
}
