//! Routing service configuration

use serde::{Deserialize, Serialize};

/// Configuration for the Google Routes API client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutesConfig {
    /// Base URL of the Routes API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key sent as `X-Goog-Api-Key`
    #[serde(default)]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// BCP-47 language for instructions and localized values
    #[serde(default = "default_language_code")]
    pub language_code: String,

    /// Unit system for localized values (`METRIC` or `IMPERIAL`)
    #[serde(default = "default_units")]
    pub units: String,

    /// Ask for alternative routes unless a request opts out
    #[serde(default = "default_compute_alternative_routes")]
    pub compute_alternative_routes: bool,
}

fn default_base_url() -> String {
    "https://routes.googleapis.com".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

fn default_language_code() -> String {
    "en-US".to_string()
}

fn default_units() -> String {
    "METRIC".to_string()
}

const fn default_compute_alternative_routes() -> bool {
    true
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
            language_code: default_language_code(),
            units: default_units(),
            compute_alternative_routes: default_compute_alternative_routes(),
        }
    }
}

impl RoutesConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            api_key: Some("test-key".to_string()),
            timeout_secs: 5,
            ..Default::default()
        }
    }

    /// Full URL of the computeRoutes endpoint
    #[must_use]
    pub fn compute_routes_url(&self) -> String {
        format!(
            "{}/directions/v2:computeRoutes",
            self.base_url.trim_end_matches('/')
        )
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("base_url must not be empty".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        if !matches!(self.units.as_str(), "METRIC" | "IMPERIAL") {
            return Err(format!(
                "units must be METRIC or IMPERIAL, got {}",
                self.units
            ));
        }

        Ok(())
    }
}
