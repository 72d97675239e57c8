use std::fmt::Display;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum TravelMode {
    Walking,
    Bike,
    Car,
    PublicTransport,
}

impl TravelMode {
    /// average speed of the fallback circle for modes without a transit network
    pub fn fallback_speed_meters_per_minute(&self) -> f64 {
        match self {
            TravelMode::Walking | TravelMode::PublicTransport => 83.0,
            TravelMode::Bike => 250.0,
            TravelMode::Car => 420.0,
        }
    }

    /// shape factor applied to the fallback radius along a bearing. cars reach
    /// farther along the north-south and east-west axes, bikes a little farther
    /// along the diagonals' complements.
    pub fn radius_factor(&self, bearing: f64) -> f64 {
        match self {
            TravelMode::Car => 0.8 + 0.3 * bearing.cos().abs(),
            TravelMode::Bike => 0.9 + 0.1 * (2.0 * bearing).cos().abs(),
            TravelMode::Walking | TravelMode::PublicTransport => 1.0,
        }
    }
}

impl Display for TravelMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TravelMode::Walking => "walking",
            TravelMode::Bike => "bike",
            TravelMode::Car => "car",
            TravelMode::PublicTransport => "public_transport",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::TravelMode;

    #[test]
    fn test_display_matches_serde() {
        for mode in [
            TravelMode::Walking,
            TravelMode::Bike,
            TravelMode::Car,
            TravelMode::PublicTransport,
        ] {
            let json = serde_json::to_string(&mode).expect("mode should serialize");
            assert_eq!(json, format!("\"{mode}\""));
        }
    }
}
