mod cache_key;
mod isochrone_cache;
mod timed_memory_cache;

pub use cache_key::CacheKey;
pub use isochrone_cache::IsochroneCache;
pub use timed_memory_cache::{TimedMemoryCache, DEFAULT_TTL_HOURS};
