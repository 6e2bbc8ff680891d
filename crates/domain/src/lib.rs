//! Domain layer for wayfarer
//!
//! Contains the geospatial core of the trip planner: coordinates, the encoded
//! polyline codec, great-circle distance, and the provider-agnostic route and
//! place models. This layer performs no I/O and defines the ubiquitous language
//! shared by the application and integration crates.

pub mod entities;
pub mod errors;
pub mod geo;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use geo::{BoundingBox, EncodedPolyline, PolylineError, distance_meters, within_radius};
pub use value_objects::*;
