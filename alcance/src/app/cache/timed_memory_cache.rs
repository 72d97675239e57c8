use std::{collections::HashMap, sync::Mutex};

use chrono::{DateTime, TimeDelta, Utc};

use crate::model::isochrone::Isochrone;

use super::{CacheKey, IsochroneCache};

pub const DEFAULT_TTL_HOURS: i64 = 24;

/// in-process cache whose entries expire a fixed time after insertion. expired
/// entries are dropped when read or by [`TimedMemoryCache::purge_expired`].
#[derive(Debug)]
pub struct TimedMemoryCache {
    ttl: TimeDelta,
    entries: Mutex<HashMap<CacheKey, (DateTime<Utc>, Isochrone)>>,
}

impl Default for TimedMemoryCache {
    fn default() -> Self {
        TimedMemoryCache::new(TimeDelta::hours(DEFAULT_TTL_HOURS))
    }
}

impl TimedMemoryCache {
    pub fn new(ttl: TimeDelta) -> TimedMemoryCache {
        TimedMemoryCache {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn get_at(&self, key: &CacheKey, now: DateTime<Utc>) -> Option<Isochrone> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        match entries.get(key) {
            Some((stored, isochrone)) if now - *stored < self.ttl => Some(isochrone.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    pub fn put_at(&self, key: CacheKey, isochrone: Isochrone, now: DateTime<Utc>) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(key, (now, isochrone));
    }

    /// drops every expired entry, returning how many were removed
    pub fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let before = entries.len();
        entries.retain(|_, (stored, _)| now - *stored < self.ttl);
        before - entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl IsochroneCache for TimedMemoryCache {
    fn get(&self, key: &CacheKey) -> Option<Isochrone> {
        self.get_at(key, Utc::now())
    }

    fn put(&self, key: CacheKey, isochrone: Isochrone) {
        self.put_at(key, isochrone, Utc::now())
    }

    fn evict(&self, key: &CacheKey) -> bool {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.remove(key).is_some()
    }
}
