use serde::{Deserialize, Serialize};

use crate::model::region::Disk;

/// record of how a transit isochrone was assembled. times are in minutes and
/// distances in meters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebugTrace {
    /// walking share of the budget
    pub max_walk_time: f64,
    /// radius of the origin disk
    pub max_walk_distance: f64,
    pub total_time: f64,
    /// meters per minute
    pub walk_speed: f64,
    pub routes_used: Vec<RouteTrace>,
    /// every disk produced, in simple output mode
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub disks: Option<Vec<DiskTrace>>,
    /// number of connected groups, in merged output mode
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub groups: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteTrace {
    pub route_name: String,
    /// set for adjacency chains
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub route_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub shape_id: Option<String>,
    pub nearest_stop: String,
    pub walk_time_to_stop: f64,
    pub stops_reached: Vec<StopTrace>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopTrace {
    pub name: String,
    pub stop_id: String,
    /// [lon, lat]
    pub coordinates: [f64; 2],
    pub time_spent: f64,
    pub time_remaining: f64,
    pub walk_radius: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiskTrace {
    /// [lon, lat]
    pub center: [f64; 2],
    pub radius: f64,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub route: Option<String>,
    pub is_origin: bool,
}

impl From<&Disk> for DiskTrace {
    fn from(disk: &Disk) -> Self {
        DiskTrace {
            center: [disk.center.x, disk.center.y],
            radius: disk.radius_meters,
            label: disk.label.clone(),
            route: disk.route.clone(),
            is_origin: disk.is_origin,
        }
    }
}
