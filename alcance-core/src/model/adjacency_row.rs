use serde::{Deserialize, Serialize};

use crate::model::RouteShapeKey;

/// a row in the adjacency table. one row exists per (route_id, shape_id, stop_id)
/// and names the canonical next stop along that shape along with the travel time
/// and distance to reach it.
///
/// the column names are part of the on-disk format consumed at request time:
/// `route_id,shape_id,stop_id,next_stop_id,travel_time_to_next,travel_distance_to_next`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AdjacencyRow {
    pub route_id: String,
    pub shape_id: String,
    pub stop_id: String,
    /// successor of this stop. empty when this stop is the end of the line.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub next_stop_id: Option<String>,
    /// median in-vehicle travel time in seconds, if known
    #[serde(default, deserialize_with = "lenient_f64")]
    pub travel_time_to_next: Option<f64>,
    /// median travel distance along the shape in meters, if known
    #[serde(default, deserialize_with = "lenient_f64")]
    pub travel_distance_to_next: Option<f64>,
}

impl AdjacencyRow {
    pub fn route_shape_key(&self) -> RouteShapeKey {
        RouteShapeKey::new(&self.route_id, &self.shape_id)
    }

    /// true if this row has no successor.
    pub fn is_end_of_line(&self) -> bool {
        self.next_stop_id.is_none()
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

/// numeric columns in the adjacency table may be empty. unparseable or negative values
/// are treated as missing so a single bad cell never invalidates a row.
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    let parsed = value
        .and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite() && *v >= 0.0);
    Ok(parsed)
}
