use serde::{Deserialize, Serialize};

use crate::model::network::Stop;

/// a stop reached within the time budget. only ever produced with positive
/// remaining time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReachableStop {
    pub stop: Stop,
    /// walking, boarding and in-vehicle seconds spent to arrive at this stop
    pub cumulative_elapsed_seconds: f64,
    /// budget seconds left on arrival, all of which may be spent walking
    pub time_remaining_seconds: f64,
}
