//! Places adapter - Implements PlacesPort using integration_places

use application::error::ApplicationError;
use application::ports::PlacesPort;
use async_trait::async_trait;
use domain::{PlaceDetails, PlaceQuery, PlaceResult, PlaceSearchRequest};
use integration_places::{GooglePlacesClient, PlacesClient, PlacesConfig, PlacesError};
use tracing::{debug, instrument, warn};

const SERVICE: &str = "places";

/// Adapter for place search using the Google Places API
pub struct PlacesAdapter {
    client: GooglePlacesClient,
}

impl std::fmt::Debug for PlacesAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlacesAdapter")
            .field("client", &"GooglePlacesClient")
            .finish()
    }
}

impl PlacesAdapter {
    #[must_use]
    pub const fn new(client: GooglePlacesClient) -> Self {
        Self { client }
    }

    /// Create an adapter from client configuration
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if the client cannot be built from `config`.
    pub fn with_config(config: &PlacesConfig) -> Result<Self, ApplicationError> {
        let client = GooglePlacesClient::new(config)
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;
        Ok(Self::new(client))
    }

    fn map_error(err: PlacesError) -> ApplicationError {
        match err {
            PlacesError::Domain(e) => ApplicationError::Domain(e),
            other => {
                let retryable = other.is_retryable();
                ApplicationError::provider(SERVICE, other.to_string(), retryable)
            },
        }
    }
}

#[async_trait]
impl PlacesPort for PlacesAdapter {
    #[instrument(skip(self, request))]
    async fn search(
        &self,
        request: &PlaceSearchRequest,
    ) -> Result<Vec<PlaceResult>, ApplicationError> {
        let result = match &request.query {
            PlaceQuery::Text(_) => self.client.search_text(request).await,
            PlaceQuery::Types(_) => self.client.search_nearby(request).await,
        };

        let places = result.map_err(|e| {
            warn!(error = %e, "Place search failed");
            Self::map_error(e)
        })?;

        debug!(count = places.len(), "Places received");
        Ok(places)
    }

    #[instrument(skip(self))]
    async fn place_details(&self, place_id: &str) -> Result<PlaceDetails, ApplicationError> {
        self.client
            .place_details(place_id)
            .await
            .map_err(Self::map_error)
    }

    async fn is_available(&self) -> bool {
        self.client.is_healthy().await
    }
}
