//! Encoded polyline codec
//!
//! Implements the compact ASCII encoding mapping providers use for paths:
//! each coordinate is stored as a zigzag-signed delta from the previous point
//! in 1e-5 degree fixed point, split into 5-bit groups offset by 63. A group
//! with bit `0x20` set is followed by another group of the same value.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::value_objects::Coordinate;

/// Fixed-point scale (5 decimal places)
const FACTOR: f64 = 1e5;

/// Offset added to every 5-bit group to land in printable ASCII
const CHAR_OFFSET: u8 = 63;

/// Continuation bit of a group
const CONTINUATION: u64 = 0x20;

/// Payload mask of a group
const CHUNK_MASK: u64 = 0x1f;

/// Shift of the last possible group; only its low four bits fit in 64 bits
const MAX_SHIFT: u32 = 60;

/// Errors raised while decoding a malformed polyline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PolylineError {
    /// Input ended while a group still had its continuation bit set
    #[error("Unterminated polyline chunk at byte {position}")]
    UnterminatedChunk { position: usize },

    /// Input ended after a latitude without its longitude
    #[error("Polyline ends with an incomplete point starting at byte {position}")]
    IncompletePoint { position: usize },

    /// Byte outside the encodable range `?`..=`~`
    #[error("Invalid polyline character {byte:#04x} at byte {position}")]
    InvalidCharacter { position: usize, byte: u8 },

    /// Value or running sum does not fit a 64-bit integer
    #[error("Polyline value overflows at byte {position}")]
    Overflow { position: usize },
}

/// Decode an encoded polyline into its coordinate sequence
///
/// An empty string decodes to an empty sequence. Decoded coordinates are not
/// range-checked; the codec is a pure bit-level transform.
pub fn decode(encoded: &str) -> Result<Vec<Coordinate>, PolylineError> {
    let bytes = encoded.as_bytes();
    let mut index = 0;
    let mut lat: i64 = 0;
    let mut lng: i64 = 0;
    let mut points = Vec::with_capacity(bytes.len() / 4);

    while index < bytes.len() {
        let point_start = index;

        let delta_lat = next_value(bytes, &mut index)?;
        if index >= bytes.len() {
            return Err(PolylineError::IncompletePoint {
                position: point_start,
            });
        }
        let delta_lng = next_value(bytes, &mut index)?;

        lat = lat
            .checked_add(delta_lat)
            .ok_or(PolylineError::Overflow { position: index })?;
        lng = lng
            .checked_add(delta_lng)
            .ok_or(PolylineError::Overflow { position: index })?;

        points.push(Coordinate::new_unchecked(
            lat as f64 / FACTOR,
            lng as f64 / FACTOR,
        ));
    }

    Ok(points)
}

/// Read one zigzag-encoded value starting at `index`, advancing past it
fn next_value(bytes: &[u8], index: &mut usize) -> Result<i64, PolylineError> {
    let mut result: u64 = 0;
    let mut shift: u32 = 0;

    loop {
        let Some(&byte) = bytes.get(*index) else {
            return Err(PolylineError::UnterminatedChunk { position: *index });
        };
        if !(CHAR_OFFSET..=b'~').contains(&byte) {
            return Err(PolylineError::InvalidCharacter {
                position: *index,
                byte,
            });
        }

        let chunk = u64::from(byte - CHAR_OFFSET);
        let payload = chunk & CHUNK_MASK;
        if shift > MAX_SHIFT || (payload << shift) >> shift != payload {
            return Err(PolylineError::Overflow { position: *index });
        }
        result |= payload << shift;
        shift += 5;
        *index += 1;

        if chunk & CONTINUATION == 0 {
            break;
        }
    }

    let value = (result >> 1) as i64;
    Ok(if result & 1 == 1 { !value } else { value })
}

/// Encode coordinates into a polyline string
///
/// Lossy to 1e-5 degrees: each coordinate is rounded to five decimals.
#[must_use]
pub fn encode(points: &[Coordinate]) -> String {
    let mut out = String::with_capacity(points.len() * 8);
    let mut prev_lat: i64 = 0;
    let mut prev_lng: i64 = 0;

    for point in points {
        let lat = (point.lat() * FACTOR).round() as i64;
        let lng = (point.lng() * FACTOR).round() as i64;
        push_value(lat - prev_lat, &mut out);
        push_value(lng - prev_lng, &mut out);
        prev_lat = lat;
        prev_lng = lng;
    }

    out
}

fn push_value(delta: i64, out: &mut String) {
    let mut value = ((delta << 1) ^ (delta >> 63)) as u64;
    while value >= CONTINUATION {
        let chunk = (CONTINUATION | (value & CHUNK_MASK)) as u8;
        out.push(char::from(chunk + CHAR_OFFSET));
        value >>= 5;
    }
    out.push(char::from(value as u8 + CHAR_OFFSET));
}

/// An encoded polyline string as received from or sent to a provider
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncodedPolyline(String);

impl EncodedPolyline {
    /// Wrap an encoded string without validating it
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Encode a coordinate sequence
    #[must_use]
    pub fn from_points(points: &[Coordinate]) -> Self {
        Self(encode(points))
    }

    /// Decode into coordinates
    pub fn decode(&self) -> Result<Vec<Coordinate>, PolylineError> {
        decode(&self.0)
    }

    /// The raw encoded string
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the polyline holds no points
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for EncodedPolyline {
    fn from(encoded: String) -> Self {
        Self(encoded)
    }
}

impl fmt::Display for EncodedPolyline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REFERENCE: &str = "_p~iF~ps|U_ulLnnqC_mqNvxq`@";

    fn assert_close(point: &Coordinate, lat: f64, lng: f64) {
        assert!((point.lat() - lat).abs() < 1e-5, "lat {} != {lat}", point.lat());
        assert!((point.lng() - lng).abs() < 1e-5, "lng {} != {lng}", point.lng());
    }

    #[test]
    fn test_decode_reference_polyline() {
        let points = decode(REFERENCE).unwrap();
        assert_eq!(points.len(), 3);
        assert_close(&points[0], 38.5, -120.2);
        assert_close(&points[1], 40.7, -120.95);
        assert_close(&points[2], 43.252, -126.453);
    }

    #[test]
    fn test_encode_reference_polyline() {
        let points = [
            Coordinate::new_unchecked(38.5, -120.2),
            Coordinate::new_unchecked(40.7, -120.95),
            Coordinate::new_unchecked(43.252, -126.453),
        ];
        assert_eq!(encode(&points), REFERENCE);
    }

    #[test]
    fn test_decode_empty() {
        assert!(decode("").unwrap().is_empty());
    }

    #[test]
    fn test_decode_single_origin_point() {
        // Two zero deltas
        let points = decode("??").unwrap();
        assert_eq!(points.len(), 1);
        assert_close(&points[0], 0.0, 0.0);
    }

    #[test]
    fn test_decode_unterminated_chunk() {
        // '_' is 0x5f - 63 = 0x20, continuation set with nothing following
        let err = decode("_").unwrap_err();
        assert_eq!(err, PolylineError::UnterminatedChunk { position: 1 });
    }

    #[test]
    fn test_decode_truncated_reference() {
        let truncated = &REFERENCE[..REFERENCE.len() - 1];
        assert!(matches!(
            decode(truncated),
            Err(PolylineError::UnterminatedChunk { .. })
        ));
    }

    #[test]
    fn test_decode_incomplete_point() {
        // A complete latitude value with no longitude
        let err = decode("_p~iF").unwrap_err();
        assert_eq!(err, PolylineError::IncompletePoint { position: 0 });
    }

    #[test]
    fn test_decode_invalid_character() {
        let err = decode("_p~iF ps|U").unwrap_err();
        assert_eq!(
            err,
            PolylineError::InvalidCharacter {
                position: 5,
                byte: b' '
            }
        );
    }

    #[test]
    fn test_decode_overflow() {
        let long_chunk = "~".repeat(20);
        assert!(matches!(
            decode(&long_chunk),
            Err(PolylineError::Overflow { .. })
        ));
    }

    #[test]
    fn test_decode_last_group_keeps_only_four_bits() {
        let widest = format!("{}N?", "~".repeat(12));
        let points = decode(&widest).unwrap();
        assert_eq!(points.len(), 1);
        assert!((points[0].lat() - i64::MIN as f64 / FACTOR).abs() < 1.0);

        let too_wide = format!("{}O?", "~".repeat(12));
        assert_eq!(
            decode(&too_wide),
            Err(PolylineError::Overflow { position: 12 })
        );
    }

    #[test]
    fn test_negative_and_small_deltas() {
        let points = [
            Coordinate::new_unchecked(-0.00001, 0.00001),
            Coordinate::new_unchecked(-33.86882, 151.20929),
            Coordinate::new_unchecked(-33.86882, 151.20929),
        ];
        let decoded = decode(&encode(&points)).unwrap();
        assert_eq!(decoded.len(), 3);
        for (original, round_tripped) in points.iter().zip(&decoded) {
            assert_close(round_tripped, original.lat(), original.lng());
        }
    }

    #[test]
    fn test_encoded_polyline_wrapper() {
        let polyline = EncodedPolyline::new(REFERENCE);
        assert_eq!(polyline.as_str(), REFERENCE);
        assert_eq!(polyline.to_string(), REFERENCE);
        assert!(!polyline.is_empty());
        assert_eq!(polyline.decode().unwrap().len(), 3);
        assert!(EncodedPolyline::default().decode().unwrap().is_empty());
    }

    #[test]
    fn test_encoded_polyline_serializes_as_string() {
        let polyline = EncodedPolyline::new("??");
        assert_eq!(serde_json::to_string(&polyline).unwrap(), r#""??""#);
    }
}
