mod line_catalog;
mod network_error;
mod network_handle;
mod route_catalog;
mod shape_chain;
mod stop;
mod stop_catalog;
mod table_ops;
mod transit_network;

pub use line_catalog::{LineCatalog, LineStop, TransitLine};
pub use network_error::NetworkError;
pub use network_handle::NetworkHandle;
pub use route_catalog::{RouteCatalog, RouteInfo};
pub use shape_chain::{read_shape_chains, ChainEdge, ShapeChain};
pub use stop::Stop;
pub use stop_catalog::StopCatalog;
pub use transit_network::TransitNetwork;
