use crate::model::isochrone::Isochrone;

use super::CacheKey;

/// result store consulted by the request layer before computing an isochrone.
/// implementations decide their own expiry; callers only get, put and evict.
pub trait IsochroneCache: Send + Sync {
    fn get(&self, key: &CacheKey) -> Option<Isochrone>;

    fn put(&self, key: CacheKey, isochrone: Isochrone);

    /// removes an entry, returning true if one was present
    fn evict(&self, key: &CacheKey) -> bool;
}
