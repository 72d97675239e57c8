use std::fmt::Display;

use clap::ValueEnum;
use geo::Geometry;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use wkt::ToWkt;

use super::{Isochrone, IsochroneError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum IsochroneOutputFormat {
    /// a GeoJSON Feature carrying the isochrone properties
    #[default]
    GeoJson,
    /// the polygon alone as WKT
    Wkt,
}

impl IsochroneOutputFormat {
    /// renders the isochrone as a single line of text. the id becomes the GeoJSON
    /// feature id and is not part of WKT output.
    pub fn serialize_isochrone(
        &self,
        isochrone: &Isochrone,
        id: Option<&str>,
    ) -> Result<String, IsochroneError> {
        let geometry: Geometry<f64> = Geometry::Polygon(isochrone.polygon.clone());
        match self {
            IsochroneOutputFormat::Wkt => Ok(geometry.wkt_string()),
            IsochroneOutputFormat::GeoJson => {
                let properties = match serde_json::to_value(&isochrone.properties)? {
                    Value::Object(map) => Some(map),
                    other => {
                        return Err(IsochroneError::InternalError(format!(
                            "isochrone properties serialized to a non-object value: {other}"
                        )))
                    }
                };
                let feature = geojson::Feature {
                    bbox: None,
                    geometry: Some(geojson::Geometry::from(&geometry)),
                    id: id.map(|s| geojson::feature::Id::String(s.to_string())),
                    properties,
                    foreign_members: None,
                };
                let result = serde_json::to_value(feature)?;
                Ok(result.to_string())
            }
        }
    }
}

impl Display for IsochroneOutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IsochroneOutputFormat::GeoJson => write!(f, "geo_json"),
            IsochroneOutputFormat::Wkt => write!(f, "wkt"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        config::IsochroneParameters,
        isochrone::{run_isochrone, IsochroneRequest, TravelMode},
        network::TransitNetwork,
    };

    fn walking_isochrone() -> Isochrone {
        let request = IsochroneRequest::new(-34.6, -58.4, TravelMode::Walking, 45)
            .expect("test invariant failed: request should validate");
        run_isochrone(&request, &TransitNetwork::empty(), &IsochroneParameters::default())
    }

    #[test]
    fn test_geojson_feature_carries_properties() {
        let text = IsochroneOutputFormat::GeoJson
            .serialize_isochrone(&walking_isochrone(), Some("home"))
            .expect("test invariant failed: serialization should succeed");
        let value: Value = serde_json::from_str(&text).expect("output should be json");
        assert_eq!(value["type"], "Feature");
        assert_eq!(value["id"], "home");
        assert_eq!(value["geometry"]["type"], "Polygon");
        assert_eq!(value["properties"]["mode"], "walking");
        assert_eq!(value["properties"]["time_budget"], 45);
        assert_eq!(value["properties"]["color"], "#f97316");
        assert_eq!(value["properties"]["fill_opacity"], 0.3);
        let ring = value["geometry"]["coordinates"][0]
            .as_array()
            .expect("polygon has an exterior ring");
        assert_eq!(ring.len(), 9);
        assert_eq!(ring.first(), ring.last());
    }

    #[test]
    fn test_wkt_polygon() {
        let text = IsochroneOutputFormat::Wkt
            .serialize_isochrone(&walking_isochrone(), None)
            .expect("test invariant failed: serialization should succeed");
        assert!(text.starts_with("POLYGON"));
    }
}
