//! Place search port

use async_trait::async_trait;
use domain::{PlaceDetails, PlaceResult, PlaceSearchRequest};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for searching places
///
/// Implementations return what the provider returned; radius enforcement
/// happens in the application layer.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PlacesPort: Send + Sync {
    /// Run a text or nearby search, depending on the request's query
    async fn search(
        &self,
        request: &PlaceSearchRequest,
    ) -> Result<Vec<PlaceResult>, ApplicationError>;

    /// Look up a single place by id
    async fn place_details(&self, place_id: &str) -> Result<PlaceDetails, ApplicationError>;

    /// Check if the places service is available
    async fn is_available(&self) -> bool;
}
