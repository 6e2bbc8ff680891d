//! Pure geometry: great-circle distance, bounding boxes and the encoded polyline codec

mod bounds;
mod distance;
mod polyline;

pub use bounds::BoundingBox;
pub use distance::{EARTH_RADIUS_METERS, distance_meters, within_radius};
pub use polyline::{EncodedPolyline, PolylineError, decode, encode};
