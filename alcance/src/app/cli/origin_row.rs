use serde::{Deserialize, Serialize};

use crate::model::isochrone::{IsochroneError, IsochroneRequest, TravelMode};

/// one row of a batch origins file. only `lat` and `lon` are required; `minutes`
/// and `mode` fall back to the batch defaults when blank.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OriginRow {
    pub id: Option<String>,
    pub lat: Option<String>,
    pub lon: Option<String>,
    pub minutes: Option<String>,
    pub mode: Option<String>,
}

impl OriginRow {
    /// builds the request for this row, or a message describing why the row is unusable.
    pub fn to_request(
        &self,
        default_mode: TravelMode,
        default_minutes: u32,
    ) -> Result<IsochroneRequest, String> {
        let lat = parse_field::<f64>("lat", &self.lat)?.ok_or("missing lat")?;
        let lon = parse_field::<f64>("lon", &self.lon)?.ok_or("missing lon")?;
        let minutes = parse_field::<u32>("minutes", &self.minutes)?.unwrap_or(default_minutes);
        let mode = match non_blank(&self.mode) {
            None => default_mode,
            Some(m) => serde_json::from_value(serde_json::Value::String(m.to_string()))
                .map_err(|_| format!("unknown travel mode '{m}'"))?,
        };
        IsochroneRequest::new(lat, lon, mode, minutes).map_err(|e: IsochroneError| e.to_string())
    }
}

fn non_blank(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn parse_field<T: std::str::FromStr>(name: &str, field: &Option<String>) -> Result<Option<T>, String> {
    match non_blank(field) {
        None => Ok(None),
        Some(s) => s
            .parse::<T>()
            .map(Some)
            .map_err(|_| format!("unparsable {name} '{s}'")),
    }
}
