//! Application configuration
//!
//! Layered as defaults, then an optional `config.toml`, then environment
//! variables such as `WAYFARER_ROUTES__TIMEOUT_SECS=10`.

use application::HealthConfig;
use application::services::DEFAULT_TRANSIT_COLOR;
use integration_places::PlacesConfig;
use integration_routes::RoutesConfig;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::telemetry::TelemetryConfig;

/// Prefix of environment variable overrides
pub const ENV_PREFIX: &str = "WAYFARER";

/// Separator between nested keys in environment variables
pub const ENV_SEPARATOR: &str = "__";

/// Map rendering settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Stroke color for transit lines without their own color
    #[serde(default = "default_transit_color")]
    pub default_transit_color: String,
}

fn default_transit_color() -> String {
    DEFAULT_TRANSIT_COLOR.to_string()
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            default_transit_color: default_transit_color(),
        }
    }
}

/// Main application configuration
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Routing provider
    #[serde(default)]
    pub routes: RoutesConfig,

    /// Places provider
    #[serde(default)]
    pub places: PlacesConfig,

    #[serde(default)]
    pub telemetry: TelemetryConfig,

    #[serde(default)]
    pub health: HealthConfig,

    #[serde(default)]
    pub render: RenderConfig,

    /// Key used by both providers unless they set their own (sensitive)
    #[serde(default, skip_serializing)]
    pub google_maps_api_key: Option<SecretString>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("routes", &self.routes)
            .field("places", &self.places)
            .field("telemetry", &self.telemetry)
            .field("health", &self.health)
            .field("render", &self.render)
            .field(
                "google_maps_api_key",
                &if self.google_maps_api_key.is_some() {
                    Some("[REDACTED]")
                } else {
                    None
                },
            )
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from `config.toml` (if present) and environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from the given file (extension optional) and environment
    pub fn load_from(file: &str) -> Result<Self, config::ConfigError> {
        Self::build(file, environment())
    }

    fn build(file: &str, env: config::Environment) -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(file).required(false))
            .add_source(env)
            .build()?;

        let app: Self = config.try_deserialize()?;
        app.validate()?;
        debug!(?app, "Configuration loaded");
        Ok(app)
    }

    /// Validate every section
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        self.routes
            .validate()
            .map_err(|e| config::ConfigError::Message(format!("routes: {e}")))?;
        self.places
            .validate()
            .map_err(|e| config::ConfigError::Message(format!("places: {e}")))?;
        Ok(())
    }

    /// Routing client configuration with the shared key applied
    #[must_use]
    pub fn routes_config(&self) -> RoutesConfig {
        let mut routes = self.routes.clone();
        routes.api_key = self.resolve_key(routes.api_key.take());
        routes
    }

    /// Places client configuration with the shared key applied
    #[must_use]
    pub fn places_config(&self) -> PlacesConfig {
        let mut places = self.places.clone();
        places.api_key = self.resolve_key(places.api_key.take());
        places
    }

    fn resolve_key(&self, own: Option<String>) -> Option<String> {
        own.filter(|key| !key.is_empty()).or_else(|| {
            self.google_maps_api_key
                .as_ref()
                .map(|key| key.expose_secret().to_string())
        })
    }
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator(ENV_SEPARATOR)
        .try_parsing(true)
}
