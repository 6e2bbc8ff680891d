//! Routing service port
//!
//! Defines how the application obtains route alternatives. Adapters in the
//! infrastructure layer implement this port with a concrete provider client.

use async_trait::async_trait;
use domain::{Route, RouteRequest};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for computing routes
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RoutingPort: Send + Sync {
    /// Compute route alternatives, best first
    ///
    /// # Errors
    ///
    /// `EmptyRouteSet` when the provider has no route, `Provider` for
    /// transport failures.
    async fn compute_routes(&self, request: &RouteRequest) -> Result<Vec<Route>, ApplicationError>;

    /// Check if the routing service is available
    async fn is_available(&self) -> bool;
}
