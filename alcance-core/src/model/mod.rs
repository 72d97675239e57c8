mod adjacency_row;
mod route_shape_key;
mod stop_row;

pub use adjacency_row::AdjacencyRow;
pub use route_shape_key::RouteShapeKey;
pub use stop_row::StopRow;
