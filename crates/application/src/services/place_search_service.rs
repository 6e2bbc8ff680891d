//! Place search service
//!
//! Runs provider searches and applies the radius check to whatever comes
//! back, so callers only ever see places inside the requested circle.

use std::sync::Arc;

use domain::{PlaceDetails, PlaceResult, PlaceSearchRequest};
use tracing::{debug, instrument};

use crate::error::ApplicationError;
use crate::ports::PlacesPort;
use crate::services::search_radius::enforce_radius;

/// Service for searching places around a point
pub struct PlaceSearchService {
    places: Arc<dyn PlacesPort>,
}

impl std::fmt::Debug for PlaceSearchService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaceSearchService")
            .field("places", &"<PlacesPort>")
            .finish()
    }
}

impl PlaceSearchService {
    #[must_use]
    pub fn new(places: Arc<dyn PlacesPort>) -> Self {
        Self { places }
    }

    /// Search places, keep those within the boundary, nearest first
    ///
    /// # Errors
    ///
    /// Returns `Domain` for an invalid request (no call is made) and
    /// whatever the port returns for provider failures.
    #[instrument(skip(self, request), fields(radius = request.boundary.radius_meters()))]
    pub async fn search(
        &self,
        request: &PlaceSearchRequest,
    ) -> Result<Vec<PlaceResult>, ApplicationError> {
        request.validate()?;

        let found = self.places.search(request).await?;
        let received = found.len();

        let mut places = enforce_radius(found, &request.boundary);
        places.sort_by(|a, b| {
            let da = a.distance_from_center_meters.unwrap_or(f64::INFINITY);
            let db = b.distance_from_center_meters.unwrap_or(f64::INFINITY);
            da.total_cmp(&db)
        });

        if let Some(min_rating) = request.min_rating {
            places.retain(|p| p.rating.is_some_and(|r| r >= min_rating));
        }

        debug!(received, kept = places.len(), "Place search complete");
        Ok(places)
    }

    /// Look up a single place
    ///
    /// # Errors
    ///
    /// Propagates port failures unchanged.
    #[instrument(skip(self))]
    pub async fn details(&self, place_id: &str) -> Result<PlaceDetails, ApplicationError> {
        self.places.place_details(place_id).await
    }
}
