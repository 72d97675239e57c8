use std::path::Path;

use crate::model::config::NetworkConfig;

use super::{
    read_shape_chains, table_ops::open_reader, LineCatalog, NetworkError, RouteCatalog,
    ShapeChain, StopCatalog,
};

/// an immutable snapshot of everything the request path reads. built once, then
/// shared between requests behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct TransitNetwork {
    pub stops: StopCatalog,
    pub routes: RouteCatalog,
    pub chains: Vec<ShapeChain>,
    pub lines: LineCatalog,
}

impl TransitNetwork {
    /// a network without any transit service. isochrones computed against it
    /// contain only the origin walking disk.
    pub fn empty() -> TransitNetwork {
        TransitNetwork::default()
    }

    /// loads every file named in the configuration. files that are not configured
    /// leave their part of the network empty. an adjacency table that cannot be read
    /// is logged and left empty, so requests still receive the origin walking disk.
    pub fn from_config(config: &NetworkConfig) -> Result<TransitNetwork, NetworkError> {
        TransitNetwork::load(config, false)
    }

    /// like [`TransitNetwork::from_config`], but an unreadable adjacency table is an
    /// error. used when replacing a snapshot that is already serving.
    pub fn from_config_strict(config: &NetworkConfig) -> Result<TransitNetwork, NetworkError> {
        TransitNetwork::load(config, true)
    }

    fn load(config: &NetworkConfig, strict: bool) -> Result<TransitNetwork, NetworkError> {
        if let (None, Some(adjacency)) = (&config.stops_file, &config.adjacency_file) {
            return Err(NetworkError::MissingStopsFile(adjacency.clone()));
        }
        let stops = match &config.stops_file {
            Some(f) => StopCatalog::from_file(Path::new(f))?,
            None => StopCatalog::default(),
        };
        let routes = match &config.routes_file {
            Some(f) => RouteCatalog::from_file(Path::new(f))?,
            None => RouteCatalog::default(),
        };
        let chains = match &config.adjacency_file {
            Some(f) => match open_reader(Path::new(f)).and_then(|r| read_shape_chains(r, f)) {
                Ok(chains) => chains,
                Err(e) if !strict => {
                    log::warn!("adjacency table unavailable, transit isochrones cover the origin walk only: {e}");
                    vec![]
                }
                Err(e) => return Err(e),
            },
            None => vec![],
        };
        let lines = match &config.lines_file {
            Some(f) => LineCatalog::from_file(Path::new(f))?,
            None => LineCatalog::default(),
        };
        let network = TransitNetwork {
            stops,
            routes,
            chains,
            lines,
        };
        network.log_summary();
        Ok(network)
    }

    /// true if there is no service to ride.
    pub fn is_empty(&self) -> bool {
        self.chains.is_empty() && self.lines.is_empty()
    }

    fn log_summary(&self) {
        let unlocated = self
            .chains
            .iter()
            .flat_map(|c| c.stop_ids())
            .filter(|id| self.stops.get(id).is_none())
            .count();
        if unlocated > 0 {
            log::warn!("{unlocated} adjacency rows reference stops missing from the stops file");
        }
        log::info!(
            "transit network ready: {} stops, {} routes, {} route shapes, {} lines",
            self.stops.len(),
            self.routes.len(),
            self.chains.len(),
            self.lines.lines.len()
        );
    }
}
