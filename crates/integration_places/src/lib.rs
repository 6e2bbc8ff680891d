//! Places provider integration for wayfarer
//!
//! Text search, nearby search and place details via the
//! [Google Places API (New)](https://developers.google.com/maps/documentation/places/web-service/op-overview).
//!
//! # Architecture
//!
//! [`PlacesClient`] defines the interface, implemented by [`GooglePlacesClient`].
//! Results come back as [`domain::PlaceResult`] values without any distance
//! annotation; enforcing the search radius is the caller's job, because the
//! provider treats a location bias as a hint only.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain::{Coordinate, PlaceSearchRequest, SearchBoundary};
//! use integration_places::{GooglePlacesClient, PlacesClient, PlacesConfig};
//!
//! let client = GooglePlacesClient::new(&PlacesConfig::default())?;
//! let boundary = SearchBoundary::new(Coordinate::new(48.8566, 2.3522)?, 1_500.0)?;
//!
//! let cafes = client
//!     .search_text(&PlaceSearchRequest::text("specialty coffee", boundary))
//!     .await?;
//! ```

mod client;
mod config;
mod error;
mod models;

pub use client::{GooglePlacesClient, PlacesClient};
pub use config::PlacesConfig;
pub use error::PlacesError;
pub use models::{DETAILS_FIELD_MASK, SEARCH_FIELD_MASK};

#[cfg(test)]
pub use client::MockPlacesClient;
