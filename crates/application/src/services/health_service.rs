//! Health aggregation service
//!
//! Probes the routing and places providers with per-service timeouts and
//! reports each one individually.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tokio::time::timeout;
use tracing::{debug, instrument, warn};

use crate::ports::{PlacesPort, RoutingPort};

/// Default global timeout for health checks in seconds
const DEFAULT_HEALTH_CHECK_TIMEOUT_SECS: u64 = 5;

/// Configuration for health check behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthConfig {
    /// Global timeout for all health checks in seconds (default: 5)
    #[serde(default = "default_global_timeout")]
    pub global_timeout_secs: u64,

    /// Service-specific timeout overrides in seconds
    #[serde(default)]
    pub service_timeouts: HashMap<String, u64>,
}

const fn default_global_timeout() -> u64 {
    DEFAULT_HEALTH_CHECK_TIMEOUT_SECS
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            global_timeout_secs: default_global_timeout(),
            service_timeouts: HashMap::new(),
        }
    }
}

impl HealthConfig {
    /// Get the timeout for a specific service
    #[must_use]
    pub fn timeout_for_service(&self, service: &str) -> Duration {
        let secs = self
            .service_timeouts
            .get(service)
            .copied()
            .unwrap_or(self.global_timeout_secs);
        Duration::from_secs(secs)
    }
}

/// Status of an individual provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceHealth {
    pub healthy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ServiceHealth {
    #[must_use]
    pub const fn healthy(response_time_ms: u64) -> Self {
        Self {
            healthy: true,
            response_time_ms: Some(response_time_ms),
            error: None,
        }
    }

    #[must_use]
    pub fn unhealthy(error: impl Into<String>, response_time_ms: Option<u64>) -> Self {
        Self {
            healthy: false,
            response_time_ms,
            error: Some(error.into()),
        }
    }

    /// Create a status for a provider that is not wired up
    #[must_use]
    pub fn unconfigured() -> Self {
        Self::unhealthy("Service not configured", None)
    }
}

/// Health of every provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    /// True if all providers are healthy
    pub healthy: bool,
    pub services: HashMap<String, ServiceHealth>,
    pub checked_at: chrono::DateTime<chrono::Utc>,
}

impl HealthReport {
    #[must_use]
    pub fn new(services: HashMap<String, ServiceHealth>) -> Self {
        let healthy = services.values().all(|s| s.healthy);

        Self {
            healthy,
            services,
            checked_at: chrono::Utc::now(),
        }
    }

    #[must_use]
    pub fn service_status(&self, name: &str) -> Option<&ServiceHealth> {
        self.services.get(name)
    }
}

/// Service for aggregating provider health checks
pub struct HealthService {
    config: HealthConfig,
    routing: Option<Arc<dyn RoutingPort>>,
    places: Option<Arc<dyn PlacesPort>>,
}

impl std::fmt::Debug for HealthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HealthService")
            .field("config", &self.config)
            .field("routing", &self.routing.is_some())
            .field("places", &self.places.is_some())
            .finish()
    }
}

impl Default for HealthService {
    fn default() -> Self {
        Self::new()
    }
}

impl HealthService {
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: HealthConfig::default(),
            routing: None,
            places: None,
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: HealthConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn with_routing(mut self, routing: Arc<dyn RoutingPort>) -> Self {
        self.routing = Some(routing);
        self
    }

    #[must_use]
    pub fn with_places(mut self, places: Arc<dyn PlacesPort>) -> Self {
        self.places = Some(places);
        self
    }

    /// Check every provider
    #[instrument(skip(self))]
    pub async fn check_all(&self) -> HealthReport {
        let (routing, places) = tokio::join!(self.check_routing(), self.check_places());

        let mut services = HashMap::new();
        services.insert("routing".to_string(), routing);
        services.insert("places".to_string(), places);
        HealthReport::new(services)
    }

    pub async fn check_routing(&self) -> ServiceHealth {
        match &self.routing {
            Some(routing) => self.probe("routing", routing.is_available()).await,
            None => ServiceHealth::unconfigured(),
        }
    }

    pub async fn check_places(&self) -> ServiceHealth {
        match &self.places {
            Some(places) => self.probe("places", places.is_available()).await,
            None => ServiceHealth::unconfigured(),
        }
    }

    async fn probe(&self, service: &str, check: impl Future<Output = bool>) -> ServiceHealth {
        let start = Instant::now();
        let Ok(available) = timeout(self.config.timeout_for_service(service), check).await else {
            warn!(service, "Health check timed out");
            return ServiceHealth::unhealthy("Health check timed out", None);
        };

        let response_time = start.elapsed().as_millis() as u64;
        if available {
            debug!(service, response_time_ms = response_time, "Service healthy");
            ServiceHealth::healthy(response_time)
        } else {
            warn!(service, response_time_ms = response_time, "Service unhealthy");
            ServiceHealth::unhealthy(format!("{service} service unavailable"), Some(response_time))
        }
    }
}
