use std::fmt::Display;

use crate::model::isochrone::{IsochroneOutputMode, IsochroneRequest};

/// fingerprint of a request: origin rounded to 3 decimals (about 100 m), mode and
/// budget. simple output mode requests get their own entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&IsochroneRequest> for CacheKey {
    fn from(request: &IsochroneRequest) -> Self {
        let mut key = format!(
            "{:.3},{:.3}:{}:{}",
            request.lat(),
            request.lon(),
            request.mode,
            request.minutes
        );
        if request.output_mode == IsochroneOutputMode::Simple {
            key.push_str(":simple");
        }
        CacheKey(key)
    }
}

impl Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
