//! Service wiring
//!
//! Builds the provider adapters from [`AppConfig`] and hands them to the
//! application services as ports.

use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::{PlacesPort, RoutingPort};
use application::{HealthService, PlaceSearchService, RoutePlanningService, TransitStepClassifier};
use tracing::info;

use crate::adapters::{PlacesAdapter, RoutesAdapter};
use crate::config::AppConfig;

/// Application services ready for a caller such as a UI session
#[derive(Debug, Clone)]
pub struct AppServices {
    pub planning: Arc<RoutePlanningService>,
    pub places: Arc<PlaceSearchService>,
    pub health: Arc<HealthService>,
}

impl AppServices {
    /// Wire every service against the Google providers
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if either provider client cannot be built,
    /// typically because no API key is configured.
    pub fn from_config(config: &AppConfig) -> Result<Self, ApplicationError> {
        let routing: Arc<dyn RoutingPort> =
            Arc::new(RoutesAdapter::with_config(&config.routes_config())?);
        let places: Arc<dyn PlacesPort> =
            Arc::new(PlacesAdapter::with_config(&config.places_config())?);

        let services = Self::from_ports(config, routing, places);
        info!("Services initialized");
        Ok(services)
    }

    /// Wire every service against the given ports
    pub fn from_ports(
        config: &AppConfig,
        routing: Arc<dyn RoutingPort>,
        places: Arc<dyn PlacesPort>,
    ) -> Self {
        let classifier = TransitStepClassifier::new(config.render.default_transit_color.clone());
        let health = HealthService::new()
            .with_config(config.health.clone())
            .with_routing(Arc::clone(&routing))
            .with_places(Arc::clone(&places));

        Self {
            planning: Arc::new(RoutePlanningService::with_classifier(routing, classifier)),
            places: Arc::new(PlaceSearchService::new(places)),
            health: Arc::new(health),
        }
    }
}

#[cfg(test)]
mod tests {
    use secrecy::SecretString;

    use super::*;

    #[test]
    fn from_config_without_key_fails() {
        let result = AppServices::from_config(&AppConfig::default());
        assert!(matches!(result, Err(ApplicationError::Configuration(_))));
    }

    #[test]
    fn from_config_with_shared_key() {
        let config = AppConfig {
            google_maps_api_key: Some(SecretString::from("shared-key".to_string())),
            ..AppConfig::default()
        };
        assert!(AppServices::from_config(&config).is_ok());
    }
}
