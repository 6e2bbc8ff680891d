//! Travel mode classification

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How a route or a single step is travelled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TravelMode {
    /// On foot
    Walk,
    /// Public transit (bus, rail, ferry, ...)
    Transit,
    /// Car
    #[default]
    Drive,
    /// Bicycle
    Bicycle,
    /// Motorcycle or scooter
    TwoWheeler,
}

impl TravelMode {
    /// Map a provider step/route mode string onto a travel mode
    ///
    /// Accepts both the Routes API vocabulary (`WALK`, `DRIVE`) and the older
    /// Directions vocabulary (`WALKING`, `DRIVING`), case-insensitively.
    #[must_use]
    pub fn from_provider(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "WALK" | "WALKING" => Some(Self::Walk),
            "TRANSIT" => Some(Self::Transit),
            "DRIVE" | "DRIVING" => Some(Self::Drive),
            "BICYCLE" | "BICYCLING" => Some(Self::Bicycle),
            "TWO_WHEELER" => Some(Self::TwoWheeler),
            _ => None,
        }
    }

    /// Wire name used by the routing provider
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Walk => "WALK",
            Self::Transit => "TRANSIT",
            Self::Drive => "DRIVE",
            Self::Bicycle => "BICYCLE",
            Self::TwoWheeler => "TWO_WHEELER",
        }
    }

    /// Whether this is public transit
    #[must_use]
    pub const fn is_transit(&self) -> bool {
        matches!(self, Self::Transit)
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TravelMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_provider(s).ok_or_else(|| {
            format!("Invalid travel mode: {s}. Use WALK, TRANSIT, DRIVE, BICYCLE or TWO_WHEELER")
        })
    }
}
