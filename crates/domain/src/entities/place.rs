//! Place search request and result models

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;
use crate::value_objects::{Coordinate, SearchBoundary};

/// Upper bound the provider accepts for results per page
pub const MAX_PLACE_RESULTS: u8 = 20;

/// Relative price level of a place
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceLevel {
    Free,
    Inexpensive,
    Moderate,
    Expensive,
    VeryExpensive,
}

impl PriceLevel {
    /// Parse the provider's `PRICE_LEVEL_*` value
    #[must_use]
    pub fn from_provider(value: &str) -> Option<Self> {
        match value {
            "PRICE_LEVEL_FREE" => Some(Self::Free),
            "PRICE_LEVEL_INEXPENSIVE" => Some(Self::Inexpensive),
            "PRICE_LEVEL_MODERATE" => Some(Self::Moderate),
            "PRICE_LEVEL_EXPENSIVE" => Some(Self::Expensive),
            "PRICE_LEVEL_VERY_EXPENSIVE" => Some(Self::VeryExpensive),
            _ => None,
        }
    }

    /// Short symbol for listings
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Free => "Free",
            Self::Inexpensive => "$",
            Self::Moderate => "$$",
            Self::Expensive => "$$$",
            Self::VeryExpensive => "$$$$",
        }
    }
}

/// What to search for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaceQuery {
    /// Free-text search ("coffee near the station")
    Text(String),
    /// Nearby search by place type ("restaurant", "museum")
    Types(Vec<String>),
}

/// How strictly the provider should honour the search area
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AreaConstraint {
    /// Prefer results inside the area, but allow others
    #[default]
    Bias,
    /// Only return results inside the area
    Restriction,
}

/// A place search scoped to a [`SearchBoundary`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceSearchRequest {
    pub query: PlaceQuery,
    pub boundary: SearchBoundary,
    pub constraint: AreaConstraint,
    pub max_result_count: u8,
    pub min_rating: Option<f32>,
    pub open_now: bool,
    /// Type filter for text searches
    pub included_type: Option<String>,
}

impl PlaceSearchRequest {
    /// Text search biased towards the boundary
    pub fn text(query: impl Into<String>, boundary: SearchBoundary) -> Self {
        Self {
            query: PlaceQuery::Text(query.into()),
            boundary,
            constraint: AreaConstraint::Bias,
            max_result_count: MAX_PLACE_RESULTS,
            min_rating: None,
            open_now: false,
            included_type: None,
        }
    }

    /// Nearby search restricted to the boundary
    pub fn nearby<I, S>(types: I, boundary: SearchBoundary) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            query: PlaceQuery::Types(types.into_iter().map(Into::into).collect()),
            boundary,
            constraint: AreaConstraint::Restriction,
            max_result_count: MAX_PLACE_RESULTS,
            min_rating: None,
            open_now: false,
            included_type: None,
        }
    }

    #[must_use]
    pub const fn with_constraint(mut self, constraint: AreaConstraint) -> Self {
        self.constraint = constraint;
        self
    }

    #[must_use]
    pub const fn with_max_results(mut self, count: u8) -> Self {
        self.max_result_count = count;
        self
    }

    #[must_use]
    pub const fn with_min_rating(mut self, rating: f32) -> Self {
        self.min_rating = Some(rating);
        self
    }

    #[must_use]
    pub const fn with_open_now(mut self, open_now: bool) -> Self {
        self.open_now = open_now;
        self
    }

    #[must_use]
    pub fn with_included_type(mut self, place_type: impl Into<String>) -> Self {
        self.included_type = Some(place_type.into());
        self
    }

    /// Check the request before it is sent
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for an empty query, a result count outside
    /// `1..=20`, a rating outside `0..=5`, a type filter on a nearby search,
    /// or a nearby search that only biases the area.
    pub fn validate(&self) -> Result<(), DomainError> {
        match &self.query {
            PlaceQuery::Text(text) if text.trim().is_empty() => {
                return Err(DomainError::ValidationError(
                    "Search query must not be empty".to_string(),
                ));
            },
            PlaceQuery::Types(types) => {
                if types.is_empty() || types.iter().any(|t| t.trim().is_empty()) {
                    return Err(DomainError::ValidationError(
                        "Nearby search needs at least one place type".to_string(),
                    ));
                }
                if self.constraint == AreaConstraint::Bias {
                    return Err(DomainError::ValidationError(
                        "Nearby search only supports a location restriction".to_string(),
                    ));
                }
                if self.included_type.is_some() {
                    return Err(DomainError::ValidationError(
                        "Nearby search takes its types from the query".to_string(),
                    ));
                }
            },
            PlaceQuery::Text(_) => {},
        }

        if !(1..=MAX_PLACE_RESULTS).contains(&self.max_result_count) {
            return Err(DomainError::ValidationError(format!(
                "max_result_count must be between 1 and {MAX_PLACE_RESULTS}, got {}",
                self.max_result_count
            )));
        }

        if let Some(rating) = self.min_rating {
            if !(0.0..=5.0).contains(&rating) {
                return Err(DomainError::ValidationError(format!(
                    "min_rating must be between 0 and 5, got {rating}"
                )));
            }
        }

        Ok(())
    }
}

/// A place returned by the provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceResult {
    pub id: String,
    pub name: String,
    pub formatted_address: Option<String>,
    pub location: Coordinate,
    pub rating: Option<f32>,
    pub user_rating_count: Option<u32>,
    pub types: Vec<String>,
    pub price_level: Option<PriceLevel>,
    pub business_status: Option<String>,
    /// Photo resource names
    pub photos: Vec<String>,
    /// Set once the result has been checked against a search boundary
    pub distance_from_center_meters: Option<f64>,
}

impl PlaceResult {
    /// Whether the place is listed as permanently or temporarily closed
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.business_status
            .as_deref()
            .is_some_and(|s| s.starts_with("CLOSED"))
    }
}

/// A place with the extra fields returned by a details lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceDetails {
    pub place: PlaceResult,
    pub website_uri: Option<String>,
    pub phone_number: Option<String>,
    /// One human-readable line per weekday
    pub opening_hours: Vec<String>,
}

impl fmt::Display for PlaceResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(rating) = self.rating {
            write!(f, " ({rating:.1}★)")?;
        }
        if let Some(price) = self.price_level {
            write!(f, " {}", price.symbol())?;
        }
        if let Some(distance) = self.distance_from_center_meters {
            if distance >= 1_000.0 {
                write!(f, " · {:.1} km", distance / 1_000.0)?;
            } else {
                write!(f, " · {distance:.0} m")?;
            }
        }
        Ok(())
    }
}
