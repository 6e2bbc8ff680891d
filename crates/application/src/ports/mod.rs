//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod places_port;
mod routing_port;

#[cfg(test)]
pub use places_port::MockPlacesPort;
pub use places_port::PlacesPort;
#[cfg(test)]
pub use routing_port::MockRoutingPort;
pub use routing_port::RoutingPort;
