//! Infrastructure adapters
//!
//! Adapters connect application ports to the provider clients.

mod places_adapter;
mod routes_adapter;

pub use places_adapter::PlacesAdapter;
pub use routes_adapter::RoutesAdapter;
