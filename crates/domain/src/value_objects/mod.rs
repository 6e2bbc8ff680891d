//! Value Objects - Immutable, identity-less domain primitives

mod coordinate;
mod search_boundary;
mod travel_mode;

pub use coordinate::Coordinate;
pub use search_boundary::SearchBoundary;
pub use travel_mode::TravelMode;
