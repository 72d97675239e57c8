use std::{collections::HashSet, io::Read, path::Path};

use alcance_core::util::geo_utils::equirectangular_distance;
use geo::Coord;
use serde::{Deserialize, Serialize};

use super::{route_catalog::normalize_color, table_ops::open_reader, NetworkError, Stop};

/// a station of a rail-style line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStop {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

impl LineStop {
    pub fn coord(&self) -> Coord<f64> {
        Coord {
            x: self.lon,
            y: self.lat,
        }
    }

    pub fn to_stop(&self) -> Stop {
        Stop::new(&self.id, &self.name, self.lon, self.lat)
    }
}

/// a line whose station order is authoritative, so it may be ridden in either direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitLine {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
    pub stops: Vec<LineStop>,
    /// in-vehicle seconds between consecutive stations. when absent, segment times
    /// are derived from the station spacing and the configured rail speed.
    #[serde(default)]
    pub segment_seconds: Option<Vec<f64>>,
}

impl TransitLine {
    /// in-vehicle seconds between station `index` and station `index + 1`.
    pub fn segment_travel_seconds(&self, index: usize, rail_speed_meters_per_minute: f64) -> Option<f64> {
        let from = self.stops.get(index)?;
        let to = self.stops.get(index + 1)?;
        match &self.segment_seconds {
            Some(seconds) => seconds.get(index).copied(),
            None => {
                let meters = equirectangular_distance(&from.coord(), &to.coord());
                Some(meters / rail_speed_meters_per_minute * 60.0)
            }
        }
    }

    fn validate(&self) -> Result<(), String> {
        if self.stops.len() < 2 {
            return Err(format!("line '{}' has fewer than 2 stops", self.id));
        }
        let mut seen = HashSet::new();
        for stop in self.stops.iter() {
            let in_bounds = stop.lat.is_finite()
                && stop.lon.is_finite()
                && (-90.0..=90.0).contains(&stop.lat)
                && (-180.0..=180.0).contains(&stop.lon);
            if !in_bounds {
                return Err(format!(
                    "line '{}' stop '{}' has invalid coordinates ({}, {})",
                    self.id, stop.id, stop.lat, stop.lon
                ));
            }
            if !seen.insert(stop.id.as_str()) {
                return Err(format!("line '{}' repeats stop '{}'", self.id, stop.id));
            }
        }
        if let Some(seconds) = &self.segment_seconds {
            if seconds.len() != self.stops.len() - 1 {
                return Err(format!(
                    "line '{}' has {} stops but {} segment times",
                    self.id,
                    self.stops.len(),
                    seconds.len()
                ));
            }
            if let Some(bad) = seconds.iter().find(|s| !(s.is_finite() && **s >= 0.0)) {
                return Err(format!("line '{}' has invalid segment time {bad}", self.id));
            }
        }
        Ok(())
    }
}

/// the versioned line asset as stored on disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineCatalog {
    pub version: String,
    pub lines: Vec<TransitLine>,
}

impl LineCatalog {
    pub fn from_file(path: &Path) -> Result<LineCatalog, NetworkError> {
        let reader = open_reader(path)?;
        Self::from_reader(reader, &path.display().to_string())
    }

    /// decodes and validates a line asset. an asset with any invalid line is
    /// rejected as a whole.
    pub fn from_reader<R: Read>(reader: R, source_name: &str) -> Result<LineCatalog, NetworkError> {
        let mut catalog: LineCatalog =
            serde_json::from_reader(reader).map_err(|source| NetworkError::LineAssetDecodeError {
                filepath: source_name.to_string(),
                source,
            })?;
        catalog
            .validate()
            .map_err(|message| NetworkError::InvalidLineAsset {
                filepath: source_name.to_string(),
                message,
            })?;
        for line in catalog.lines.iter_mut() {
            line.color = line.color.as_deref().and_then(normalize_color);
        }
        log::info!(
            "loaded {} lines from {source_name} (version {})",
            catalog.lines.len(),
            catalog.version
        );
        Ok(catalog)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.version.trim().is_empty() {
            return Err(String::from("missing version"));
        }
        let mut ids = HashSet::new();
        for line in self.lines.iter() {
            if !ids.insert(line.id.as_str()) {
                return Err(format!("line id '{}' appears more than once", line.id));
            }
            line.validate()?;
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ASSET: &str = r##"{
        "version": "2024-11",
        "lines": [
            {
                "id": "subte_a",
                "name": "Subte Linea A",
                "color": "#00A0E3",
                "stops": [
                    {"id": "a1", "name": "Plaza de Mayo", "lat": -34.6085, "lon": -58.3711},
                    {"id": "a2", "name": "Peru", "lat": -34.6086, "lon": -58.3742},
                    {"id": "a3", "name": "Piedras", "lat": -34.6089, "lon": -58.3790}
                ],
                "segment_seconds": [60, 75]
            }
        ]
    }"##;

    #[test]
    fn test_valid_asset_loads() {
        let catalog = LineCatalog::from_reader(ASSET.as_bytes(), "lines.json")
            .expect("test invariant failed: asset should load");
        assert_eq!(catalog.version, "2024-11");
        let line = &catalog.lines[0];
        assert_eq!(line.color.as_deref(), Some("#00a0e3"));
        assert_eq!(line.segment_travel_seconds(1, 500.0), Some(75.0));
        assert_eq!(line.segment_travel_seconds(2, 500.0), None);
    }

    #[test]
    fn test_segment_time_from_rail_speed() {
        let line = TransitLine {
            id: String::from("l"),
            name: String::from("l"),
            color: None,
            stops: vec![
                LineStop { id: String::from("s1"), name: String::from("s1"), lat: 0.0, lon: 0.0 },
                LineStop { id: String::from("s2"), name: String::from("s2"), lat: 0.01, lon: 0.0 },
            ],
            segment_seconds: None,
        };
        // 0.01 degrees of latitude is 1110 m, ridden at 500 m/min
        let seconds = line
            .segment_travel_seconds(0, 500.0)
            .expect("segment should exist");
        assert!((seconds - 1110.0 / 500.0 * 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_assets_rejected() {
        let cases = [
            ASSET.replace("\"2024-11\"", "\"\""),
            ASSET.replace("[60, 75]", "[60]"),
            ASSET.replace("[60, 75]", "[60, -1]"),
            ASSET.replace("\"id\": \"a3\"", "\"id\": \"a1\""),
            ASSET.replace("-34.6089", "-134.6089"),
        ];
        for asset in cases.iter() {
            let result = LineCatalog::from_reader(asset.as_bytes(), "lines.json");
            assert!(
                matches!(result, Err(NetworkError::InvalidLineAsset { .. })),
                "asset should be rejected: {asset}"
            );
        }
    }

    #[test]
    fn test_single_stop_line_rejected() {
        let asset = r#"{"version": "1", "lines": [{"id": "x", "name": "x",
            "stops": [{"id": "s", "name": "s", "lat": 1.0, "lon": 1.0}]}]}"#;
        let result = LineCatalog::from_reader(asset.as_bytes(), "lines.json");
        assert!(matches!(result, Err(NetworkError::InvalidLineAsset { .. })));
    }
}
