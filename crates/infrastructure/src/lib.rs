//! Infrastructure layer - Adapters for external systems
//!
//! Implements the application ports with the Google Routes and Places
//! clients, loads configuration and initialises logging.

pub mod adapters;
pub mod config;
pub mod services;
pub mod telemetry;

pub use adapters::*;
pub use config::{AppConfig, ENV_PREFIX, ENV_SEPARATOR, RenderConfig};
pub use services::AppServices;
pub use telemetry::{LogFormat, TelemetryConfig, TelemetryError, init_telemetry};
