use std::sync::{Arc, RwLock};

use crate::model::config::NetworkConfig;

use super::{NetworkError, TransitNetwork};

/// holds the network snapshot currently served. readers take a cheap `Arc`
/// clone of the snapshot; a reload builds the next snapshot completely before
/// swapping it in, so a request never observes a partially loaded network.
#[derive(Debug)]
pub struct NetworkHandle {
    current: RwLock<Arc<TransitNetwork>>,
}

impl NetworkHandle {
    pub fn new(network: TransitNetwork) -> NetworkHandle {
        NetworkHandle {
            current: RwLock::new(Arc::new(network)),
        }
    }

    pub fn snapshot(&self) -> Arc<TransitNetwork> {
        let guard = self.current.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    /// replaces the served snapshot, returning the previous one.
    pub fn swap(&self, network: TransitNetwork) -> Arc<TransitNetwork> {
        let next = Arc::new(network);
        let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
        std::mem::replace(&mut *guard, next)
    }

    /// loads a new snapshot from files and swaps it in. on failure, including an
    /// unreadable adjacency table, the current snapshot keeps serving.
    pub fn reload(&self, config: &NetworkConfig) -> Result<(), NetworkError> {
        let network = TransitNetwork::from_config_strict(config)?;
        self.swap(network);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::network::{LineCatalog, Stop, StopCatalog};

    #[test]
    fn test_readers_keep_their_snapshot_across_swap() {
        let handle = NetworkHandle::new(TransitNetwork::empty());
        let before = handle.snapshot();
        let next = TransitNetwork {
            stops: StopCatalog::from_iter([Stop::new("a", "Alpha", -58.38, -34.60)]),
            lines: LineCatalog::default(),
            ..Default::default()
        };
        let previous = handle.swap(next);
        assert!(Arc::ptr_eq(&before, &previous));
        assert_eq!(before.stops.len(), 0);
        assert_eq!(handle.snapshot().stops.len(), 1);
    }

    #[test]
    fn test_failed_reload_keeps_current() {
        let handle = NetworkHandle::new(TransitNetwork::empty());
        let config = NetworkConfig {
            stops_file: Some(String::from("/nonexistent/alcance/stops.txt")),
            ..Default::default()
        };
        assert!(handle.reload(&config).is_err());
        assert!(handle.snapshot().is_empty());
    }
}
