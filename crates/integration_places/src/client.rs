//! Google Places API client

use std::time::Duration;

use async_trait::async_trait;
use domain::{PlaceDetails, PlaceResult, PlaceSearchRequest};
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::config::PlacesConfig;
use crate::error::PlacesError;
use crate::models::{
    DETAILS_FIELD_MASK, SEARCH_FIELD_MASK, SearchNearbyBody, SearchTextBody,
    parse_details_response, parse_search_response,
};

const API_KEY_HEADER: &str = "X-Goog-Api-Key";
const FIELD_MASK_HEADER: &str = "X-Goog-FieldMask";

/// Trait for place search clients
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlacesClient: Send + Sync {
    /// Free-text search with a location bias or restriction
    async fn search_text(
        &self,
        request: &PlaceSearchRequest,
    ) -> Result<Vec<PlaceResult>, PlacesError>;

    /// Type-based search restricted to a circle
    async fn search_nearby(
        &self,
        request: &PlaceSearchRequest,
    ) -> Result<Vec<PlaceResult>, PlacesError>;

    /// Look up a single place by id
    async fn place_details(&self, place_id: &str) -> Result<PlaceDetails, PlacesError>;

    /// Check if the places service is reachable
    async fn is_healthy(&self) -> bool;
}

/// Places client backed by the Google Places API (New)
#[derive(Debug)]
pub struct GooglePlacesClient {
    client: Client,
    config: PlacesConfig,
}

impl GooglePlacesClient {
    /// Create a new Places API client
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` for an invalid configuration or a missing
    /// API key, and `ConnectionFailed` if the HTTP client cannot be built.
    pub fn new(config: &PlacesConfig) -> Result<Self, PlacesError> {
        config.validate().map_err(PlacesError::ConfigurationError)?;
        if config.api_key.as_deref().is_none_or(str::is_empty) {
            return Err(PlacesError::ConfigurationError(
                "api_key is required for the Places API".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent("wayfarer/1.0")
            .build()
            .map_err(|e| PlacesError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    fn authorized(&self, builder: RequestBuilder, field_mask: &str) -> RequestBuilder {
        builder
            .header(
                API_KEY_HEADER,
                self.config.api_key.as_deref().unwrap_or_default(),
            )
            .header(FIELD_MASK_HEADER, field_mask)
    }

    /// `{base}/places/{id}` with the id percent-encoded as one path segment
    fn details_url(&self, place_id: &str) -> Result<Url, PlacesError> {
        let mut url = Url::parse(self.config.base())
            .map_err(|e| PlacesError::ConfigurationError(format!("Invalid base_url: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| PlacesError::ConfigurationError("base_url cannot be a base".to_string()))?
            .pop_if_empty()
            .push("places")
            .push(place_id);
        Ok(url)
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, PlacesError> {
        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                PlacesError::Timeout {
                    timeout_secs: self.config.timeout_secs,
                }
            } else {
                PlacesError::ConnectionFailed(e.to_string())
            }
        })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(PlacesError::RateLimitExceeded {
                retry_after_secs: response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok()),
            });
        }

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(PlacesError::AuthenticationFailed(format!("HTTP {status}")));
        }

        Ok(response)
    }

    async fn post_search<B: Serialize + Sync>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<Vec<PlaceResult>, PlacesError> {
        let url = format!("{}/places:{endpoint}", self.config.base());
        debug!(?url, "Searching places");

        let response = self
            .send(
                self.authorized(self.client.post(&url), SEARCH_FIELD_MASK)
                    .json(body),
            )
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            warn!(%status, %detail, "Places API error");
            return Err(PlacesError::RequestFailed(format!("HTTP {status}")));
        }

        let text = response
            .text()
            .await
            .map_err(|e| PlacesError::ParseError(e.to_string()))?;

        let places = parse_search_response(&text, self.config.max_photos)?;
        debug!(count = places.len(), "Places found");
        Ok(places)
    }
}

#[async_trait]
impl PlacesClient for GooglePlacesClient {
    #[instrument(skip(self, request), fields(radius = request.boundary.radius_meters()))]
    async fn search_text(
        &self,
        request: &PlaceSearchRequest,
    ) -> Result<Vec<PlaceResult>, PlacesError> {
        let body = SearchTextBody::new(
            request,
            self.config.max_result_count,
            &self.config.language_code,
        )?;
        self.post_search("searchText", &body).await
    }

    #[instrument(skip(self, request), fields(radius = request.boundary.radius_meters()))]
    async fn search_nearby(
        &self,
        request: &PlaceSearchRequest,
    ) -> Result<Vec<PlaceResult>, PlacesError> {
        let body = SearchNearbyBody::new(
            request,
            self.config.max_result_count,
            &self.config.language_code,
        )?;
        self.post_search("searchNearby", &body).await
    }

    #[instrument(skip(self))]
    async fn place_details(&self, place_id: &str) -> Result<PlaceDetails, PlacesError> {
        if place_id.trim().is_empty() {
            return Err(PlacesError::NotFound("empty place id".to_string()));
        }

        let url = self.details_url(place_id)?;
        debug!(%url, "Fetching place details");

        let response = self
            .send(
                self.authorized(self.client.get(url), DETAILS_FIELD_MASK)
                    .query(&[("languageCode", self.config.language_code.as_str())]),
            )
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(PlacesError::NotFound(place_id.to_string()));
        }
        if !status.is_success() {
            return Err(PlacesError::RequestFailed(format!("HTTP {status}")));
        }

        let text = response
            .text()
            .await
            .map_err(|e| PlacesError::ParseError(e.to_string()))?;

        parse_details_response(&text, self.config.max_photos)
    }

    async fn is_healthy(&self) -> bool {
        let url = format!("{}/places:searchText", self.config.base());
        self.authorized(self.client.post(&url), "places.id")
            .json(&serde_json::json!({ "textQuery": "health", "maxResultCount": 1 }))
            .send()
            .await
            .is_ok()
    }
}
