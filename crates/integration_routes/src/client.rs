//! Google Routes API client
//!
//! One POST per request to `directions/v2:computeRoutes`; no retries, no
//! caching. Callers decide what to do with retryable errors.

use std::time::Duration;

use async_trait::async_trait;
use domain::{Route, RouteRequest};
use reqwest::{Client, StatusCode};
use tracing::{debug, instrument, warn};

use crate::config::RoutesConfig;
use crate::error::RoutesError;
use crate::processor::RouteResponseProcessor;
use crate::request::{ComputeRoutesBody, FIELD_MASK};

const API_KEY_HEADER: &str = "X-Goog-Api-Key";
const FIELD_MASK_HEADER: &str = "X-Goog-FieldMask";

/// Trait for routing service clients
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoutesClient: Send + Sync {
    /// Compute route alternatives for a validated request
    async fn compute_routes(&self, request: &RouteRequest) -> Result<Vec<Route>, RoutesError>;

    /// Check if the routing service is reachable
    async fn is_healthy(&self) -> bool;
}

/// Routing client backed by the Google Routes API
#[derive(Debug)]
pub struct GoogleRoutesClient {
    client: Client,
    config: RoutesConfig,
}

impl GoogleRoutesClient {
    /// Create a new Routes API client
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` for an invalid configuration or a missing
    /// API key, and `ConnectionFailed` if the HTTP client cannot be built.
    pub fn new(config: &RoutesConfig) -> Result<Self, RoutesError> {
        config.validate().map_err(RoutesError::ConfigurationError)?;
        if config.api_key.as_deref().is_none_or(str::is_empty) {
            return Err(RoutesError::ConfigurationError(
                "api_key is required for the Routes API".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent("wayfarer/1.0")
            .build()
            .map_err(|e| RoutesError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    fn api_key(&self) -> &str {
        self.config.api_key.as_deref().unwrap_or_default()
    }

    fn map_send_error(&self, e: &reqwest::Error) -> RoutesError {
        if e.is_timeout() {
            RoutesError::Timeout {
                timeout_secs: self.config.timeout_secs,
            }
        } else {
            RoutesError::ConnectionFailed(e.to_string())
        }
    }
}

#[async_trait]
impl RoutesClient for GoogleRoutesClient {
    #[instrument(skip(self, request), fields(mode = %request.travel_mode()))]
    async fn compute_routes(&self, request: &RouteRequest) -> Result<Vec<Route>, RoutesError> {
        let url = self.config.compute_routes_url();
        let body = ComputeRoutesBody::from_request(request, &self.config);

        debug!(?url, "Computing routes");

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, self.api_key())
            .header(FIELD_MASK_HEADER, FIELD_MASK)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_send_error(&e))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(RoutesError::RateLimitExceeded {
                retry_after_secs: response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok()),
            });
        }

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(RoutesError::AuthenticationFailed(format!("HTTP {status}")));
        }

        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            warn!(%status, %detail, "Routes API error");
            return Err(RoutesError::RequestFailed(format!("HTTP {status}")));
        }

        let text = response
            .text()
            .await
            .map_err(|e| RoutesError::ParseError(e.to_string()))?;

        let routes = RouteResponseProcessor::new(request.travel_mode()).process_json(&text)?;
        debug!(
            count = routes.len(),
            best_distance = routes.first().map(|r| r.distance_meters),
            "Routes computed"
        );
        Ok(routes)
    }

    async fn is_healthy(&self) -> bool {
        // Any HTTP answer means the endpoint is reachable
        self.client
            .post(self.config.compute_routes_url())
            .header(API_KEY_HEADER, self.api_key())
            .header(FIELD_MASK_HEADER, "routes.duration")
            .json(&serde_json::json!({}))
            .send()
            .await
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use domain::{Coordinate, TravelMode};

    use super::*;

    #[test]
    fn test_new_requires_api_key() {
        let config = RoutesConfig::default();
        assert!(matches!(
            GoogleRoutesClient::new(&config),
            Err(RoutesError::ConfigurationError(_))
        ));

        let config = RoutesConfig {
            api_key: Some(String::new()),
            ..RoutesConfig::default()
        };
        assert!(GoogleRoutesClient::new(&config).is_err());
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = RoutesConfig {
            timeout_secs: 0,
            ..RoutesConfig::for_testing()
        };
        assert!(matches!(
            GoogleRoutesClient::new(&config),
            Err(RoutesError::ConfigurationError(_))
        ));
    }

    #[test]
    fn test_new_with_testing_config() {
        let client = GoogleRoutesClient::new(&RoutesConfig::for_testing()).unwrap();
        assert_eq!(client.api_key(), "test-key");
    }

    #[tokio::test]
    async fn test_mock_client_is_object_safe() {
        let mut mock = MockRoutesClient::new();
        mock.expect_compute_routes()
            .returning(|_| Err(RoutesError::EmptyRouteSet));
        mock.expect_is_healthy().returning(|| false);

        let client: Box<dyn RoutesClient> = Box::new(mock);
        let request = RouteRequest::builder(
            Coordinate::new_unchecked(52.52, 13.405),
            Coordinate::new_unchecked(52.5, 13.33),
            TravelMode::Walk,
        )
        .build()
        .unwrap();

        assert!(matches!(
            client.compute_routes(&request).await,
            Err(RoutesError::EmptyRouteSet)
        ));
        assert!(!client.is_healthy().await);
    }
}
