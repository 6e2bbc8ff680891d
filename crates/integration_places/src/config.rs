//! Places service configuration

use serde::{Deserialize, Serialize};

/// Configuration for the Google Places API client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacesConfig {
    /// Base URL including the API version
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key sent as `X-Goog-Api-Key`
    #[serde(default)]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Upper bound on results per search (1-20)
    #[serde(default = "default_max_result_count")]
    pub max_result_count: u8,

    /// Language for display names and addresses
    #[serde(default = "default_language_code")]
    pub language_code: String,

    /// Photo resource names kept per place
    #[serde(default = "default_max_photos")]
    pub max_photos: usize,
}

fn default_base_url() -> String {
    "https://places.googleapis.com/v1".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

const fn default_max_result_count() -> u8 {
    20
}

fn default_language_code() -> String {
    "en".to_string()
}

const fn default_max_photos() -> usize {
    3
}

impl Default for PlacesConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
            max_result_count: default_max_result_count(),
            language_code: default_language_code(),
            max_photos: default_max_photos(),
        }
    }
}

impl PlacesConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            api_key: Some("test-key".to_string()),
            timeout_secs: 5,
            ..Default::default()
        }
    }

    /// Base URL without a trailing slash
    #[must_use]
    pub fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
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

        if !(1..=20).contains(&self.max_result_count) {
            return Err("max_result_count must be between 1 and 20".to_string());
        }

        Ok(())
    }
}
