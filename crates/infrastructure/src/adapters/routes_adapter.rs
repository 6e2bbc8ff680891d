//! Routes adapter - Implements RoutingPort using integration_routes

use application::error::ApplicationError;
use application::ports::RoutingPort;
use async_trait::async_trait;
use domain::{Route, RouteRequest};
use integration_routes::{GoogleRoutesClient, RoutesClient, RoutesConfig, RoutesError};
use tracing::{debug, instrument, warn};

const SERVICE: &str = "routes";

/// Adapter for route computation using the Google Routes API
pub struct RoutesAdapter {
    client: GoogleRoutesClient,
}

impl std::fmt::Debug for RoutesAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoutesAdapter")
            .field("client", &"GoogleRoutesClient")
            .finish()
    }
}

impl RoutesAdapter {
    /// Create an adapter around an existing client
    #[must_use]
    pub const fn new(client: GoogleRoutesClient) -> Self {
        Self { client }
    }

    /// Create an adapter from client configuration
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if the client cannot be built from `config`.
    pub fn with_config(config: &RoutesConfig) -> Result<Self, ApplicationError> {
        let client = GoogleRoutesClient::new(config)
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;
        Ok(Self::new(client))
    }

    /// Map integration errors to application errors
    ///
    /// `EmptyRouteSet` and domain failures keep their identity; every
    /// transport failure becomes a provider error.
    fn map_error(err: RoutesError) -> ApplicationError {
        match err {
            RoutesError::EmptyRouteSet => ApplicationError::EmptyRouteSet,
            RoutesError::Domain(e) => ApplicationError::Domain(e),
            other => {
                let retryable = other.is_retryable();
                ApplicationError::provider(SERVICE, other.to_string(), retryable)
            },
        }
    }
}

#[async_trait]
impl RoutingPort for RoutesAdapter {
    #[instrument(skip(self, request), fields(mode = %request.travel_mode()))]
    async fn compute_routes(&self, request: &RouteRequest) -> Result<Vec<Route>, ApplicationError> {
        let routes = self.client.compute_routes(request).await.map_err(|e| {
            warn!(error = %e, "Route computation failed");
            Self::map_error(e)
        })?;

        debug!(alternatives = routes.len(), "Routes computed");
        Ok(routes)
    }

    async fn is_available(&self) -> bool {
        self.client.is_healthy().await
    }
}
