use geo::Coord;
use serde::{Deserialize, Serialize};

use super::{IsochroneError, IsochroneOutputMode, TravelMode};

pub const MIN_MINUTES: u32 = 5;
pub const MAX_MINUTES: u32 = 120;

/// a validated isochrone request. construct with [`IsochroneRequest::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IsochroneRequest {
    /// (lon, lat)
    pub origin: Coord<f64>,
    pub mode: TravelMode,
    pub minutes: u32,
    pub output_mode: IsochroneOutputMode,
}

impl IsochroneRequest {
    pub fn new(
        lat: f64,
        lon: f64,
        mode: TravelMode,
        minutes: u32,
    ) -> Result<IsochroneRequest, IsochroneError> {
        if !(MIN_MINUTES..=MAX_MINUTES).contains(&minutes) {
            return Err(IsochroneError::InvalidTimeBudget {
                min: MIN_MINUTES,
                max: MAX_MINUTES,
                found: minutes,
            });
        }
        let invalid = |message: &str| IsochroneError::InvalidOrigin {
            lat,
            lon,
            message: message.to_string(),
        };
        if !(lat.is_finite() && lon.is_finite()) {
            return Err(invalid("coordinates must be finite"));
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(invalid("latitude must be in [-90, 90]"));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(invalid("longitude must be in [-180, 180]"));
        }
        Ok(IsochroneRequest {
            origin: Coord { x: lon, y: lat },
            mode,
            minutes,
            output_mode: IsochroneOutputMode::default(),
        })
    }

    pub fn with_output_mode(mut self, output_mode: IsochroneOutputMode) -> IsochroneRequest {
        self.output_mode = output_mode;
        self
    }

    pub fn lat(&self) -> f64 {
        self.origin.y
    }

    pub fn lon(&self) -> f64 {
        self.origin.x
    }

    pub fn budget_seconds(&self) -> f64 {
        self.minutes as f64 * 60.0
    }
}
