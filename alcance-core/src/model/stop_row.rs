use geo::Coord;
use serde::{Deserialize, Serialize};

/// a raw row of a GTFS `stops.txt` file. every field is optional so that a
/// malformed row can be reported and skipped rather than failing the whole file.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct StopRow {
    pub stop_id: Option<String>,
    pub stop_name: Option<String>,
    pub stop_lat: Option<String>,
    pub stop_lon: Option<String>,
}

impl StopRow {
    /// the stop location as a (lon, lat) coordinate, if both values parse as finite
    /// numbers within WGS84 bounds.
    pub fn coord(&self) -> Option<Coord<f64>> {
        let lat = parse_finite(self.stop_lat.as_deref())?;
        let lon = parse_finite(self.stop_lon.as_deref())?;
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return None;
        }
        Some(Coord { x: lon, y: lat })
    }

    pub fn id(&self) -> Option<&str> {
        self.stop_id.as_deref().filter(|s| !s.is_empty())
    }
}

fn parse_finite(value: Option<&str>) -> Option<f64> {
    value
        .and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}
