use std::sync::Arc;

use crate::model::{
    config::IsochroneParameters,
    isochrone::{run_isochrone, Isochrone, IsochroneRequest},
    network::NetworkHandle,
    reach::{stop_areas, StopArea},
};

use super::cache::{CacheKey, IsochroneCache};

/// request layer around the engine. owns the served network snapshot and an
/// optional result cache; the engine itself never sees either.
#[derive(Clone)]
pub struct IsochroneService {
    network: Arc<NetworkHandle>,
    params: IsochroneParameters,
    cache: Option<Arc<dyn IsochroneCache>>,
}

impl IsochroneService {
    pub fn new(network: Arc<NetworkHandle>, params: IsochroneParameters) -> IsochroneService {
        IsochroneService {
            network,
            params,
            cache: None,
        }
    }

    pub fn with_cache(mut self, cache: Arc<dyn IsochroneCache>) -> IsochroneService {
        self.cache = Some(cache);
        self
    }

    pub fn network(&self) -> &NetworkHandle {
        &self.network
    }

    pub fn params(&self) -> &IsochroneParameters {
        &self.params
    }

    /// the isochrone for a request, served from the cache when present.
    pub fn isochrone(&self, request: &IsochroneRequest) -> Isochrone {
        let key = CacheKey::from(request);
        if let Some(cached) = self.cache.as_ref().and_then(|c| c.get(&key)) {
            log::debug!("cache hit for {key}");
            return cached;
        }
        let snapshot = self.network.snapshot();
        let isochrone = run_isochrone(request, &snapshot, &self.params);
        if let Some(cache) = &self.cache {
            cache.put(key, isochrone.clone());
        }
        isochrone
    }

    /// per-stop walking areas for a request, never cached.
    pub fn stop_areas(&self, request: &IsochroneRequest) -> Vec<StopArea> {
        let snapshot = self.network.snapshot();
        stop_areas(&request.origin, request.minutes as f64, &snapshot, &self.params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        app::cache::TimedMemoryCache,
        model::{
            isochrone::TravelMode,
            network::{Stop, StopCatalog, TransitNetwork},
        },
    };

    #[test]
    fn test_cached_result_survives_network_swap() {
        let handle = Arc::new(NetworkHandle::new(TransitNetwork::empty()));
        let cache = Arc::new(TimedMemoryCache::default());
        let service = IsochroneService::new(handle.clone(), IsochroneParameters::default())
            .with_cache(cache.clone());
        let request = IsochroneRequest::new(-34.6, -58.4, TravelMode::PublicTransport, 30)
            .expect("test invariant failed: request should validate");

        let first = service.isochrone(&request);
        assert_eq!(cache.len(), 1);
        handle.swap(TransitNetwork {
            stops: StopCatalog::from_iter([Stop::new("a", "A", -58.4, -34.6)]),
            ..Default::default()
        });
        assert_eq!(service.isochrone(&request), first);
        assert!(cache.evict(&CacheKey::from(&request)));
    }
}
