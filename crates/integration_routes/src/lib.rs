//! Routing provider integration for wayfarer
//!
//! Talks to the [Google Routes API](https://developers.google.com/maps/documentation/routes)
//! `directions/v2:computeRoutes` endpoint and normalises its payload into the
//! provider-agnostic [`domain::Route`] model.
//!
//! # Architecture
//!
//! The crate follows the client-trait pattern used by the other integration crates.
//! [`RoutesClient`] defines the interface, implemented by [`GoogleRoutesClient`].
//! Request shaping lives in [`ComputeRoutesBody`]; the normalisation step is the
//! standalone [`RouteResponseProcessor`], so it can be exercised without HTTP.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain::{Coordinate, RouteRequest, TravelMode};
//! use integration_routes::{GoogleRoutesClient, RoutesClient, RoutesConfig};
//!
//! let client = GoogleRoutesClient::new(&RoutesConfig::default())?;
//! let request = RouteRequest::builder(
//!     Coordinate::new(40.758, -73.9855)?,
//!     Coordinate::new(40.7829, -73.9654)?,
//!     TravelMode::Transit,
//! )
//! .build()?;
//!
//! let routes = client.compute_routes(&request).await?;
//! ```

mod client;
mod config;
mod error;
mod processor;
pub mod raw;
mod request;

pub use client::{GoogleRoutesClient, RoutesClient};
pub use config::RoutesConfig;
pub use error::RoutesError;
pub use processor::{RouteResponseProcessor, parse_duration};
pub use request::{ComputeRoutesBody, FIELD_MASK};

#[cfg(test)]
pub use client::MockRoutesClient;
