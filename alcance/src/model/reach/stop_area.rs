use alcance_core::util::geo_utils::DistanceMetric;
use geo::Coord;
use serde::{Deserialize, Serialize};

use crate::model::{config::IsochroneParameters, network::TransitNetwork};

use super::{locate_with, traverse, RouteGroup};

/// one reached stop with the walking radius left on arrival, as written by the
/// `areas` report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopArea {
    pub stop_id: String,
    pub route_id: String,
    pub shape_id: String,
    pub stop_lat: f64,
    pub stop_lon: f64,
    pub next_stop_id: Option<String>,
    pub travel_time_to_next: Option<f64>,
    pub area_radius_m: i64,
}

/// every stop reachable from `origin` within `minutes`, one row per service and stop.
/// lines report their id as the route and an empty shape. the walk to each boarding
/// stop is measured as a great-circle distance, unlike the request path.
pub fn stop_areas(
    origin: &Coord<f64>,
    minutes: f64,
    network: &TransitNetwork,
    params: &IsochroneParameters,
) -> Vec<StopArea> {
    let budget_seconds = minutes * 60.0;
    let mut rows = vec![];
    for located in locate_with(origin, network, params, minutes, DistanceMetric::Haversine) {
        for reached in traverse(&located, network, params, budget_seconds) {
            let (route_id, shape_id, next_stop_id, travel_time_to_next) = match located.group {
                RouteGroup::Chain(idx) => {
                    let Some(chain) = network.chains.get(idx) else {
                        continue;
                    };
                    let edge = chain.edge(&reached.stop.id);
                    (
                        chain.key.route_id.clone(),
                        chain.key.shape_id.clone(),
                        edge.and_then(|e| e.next_stop_id.clone()),
                        edge.and_then(|e| e.travel_time_seconds),
                    )
                }
                RouteGroup::Line(idx) => {
                    let Some(line) = network.lines.lines.get(idx) else {
                        continue;
                    };
                    let position = line.stops.iter().position(|s| s.id == reached.stop.id);
                    let next = position.and_then(|p| line.stops.get(p + 1));
                    let seconds = position.and_then(|p| {
                        line.segment_travel_seconds(p, params.rail_speed_meters_per_minute)
                    });
                    (line.id.clone(), String::new(), next.map(|s| s.id.clone()), seconds)
                }
            };
            rows.push(StopArea {
                stop_id: reached.stop.id.clone(),
                route_id,
                shape_id,
                stop_lat: reached.stop.lat(),
                stop_lon: reached.stop.lon(),
                next_stop_id,
                travel_time_to_next,
                area_radius_m: params.walk_meters(reached.time_remaining_seconds).round() as i64,
            });
        }
    }
    rows
}
