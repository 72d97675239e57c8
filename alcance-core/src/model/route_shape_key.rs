use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// identifies one geometric variant (shape) of a route. the adjacency table
/// is partitioned by this key and each partition is treated as a linear chain.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RouteShapeKey {
    pub route_id: String,
    pub shape_id: String,
}

impl RouteShapeKey {
    pub fn new(route_id: &str, shape_id: &str) -> RouteShapeKey {
        RouteShapeKey {
            route_id: route_id.to_string(),
            shape_id: shape_id.to_string(),
        }
    }
}

impl Display for RouteShapeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.route_id, self.shape_id)
    }
}
