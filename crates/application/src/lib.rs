//! Application layer - Use cases and orchestration
//!
//! Holds the port definitions for the routing and places providers and the
//! services built on them: step classification, route selection with its
//! render arena, radius enforcement, and the latest-request-wins planning
//! session.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
