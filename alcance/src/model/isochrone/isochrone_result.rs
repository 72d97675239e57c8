use geo::Polygon;
use serde::{Deserialize, Serialize};

use super::{DebugTrace, IsochroneOutputMode, TravelMode};

/// one closed polygon plus the properties delivered alongside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Isochrone {
    pub polygon: Polygon<f64>,
    pub properties: IsochroneProperties,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IsochroneProperties {
    pub mode: TravelMode,
    /// minutes
    pub time_budget: u32,
    pub color: String,
    pub fill_color: String,
    pub fill_opacity: f64,
    /// set for transit isochrones only
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub output_mode: Option<IsochroneOutputMode>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub debug: Option<DebugTrace>,
}
