pub mod adjacency_ops;
pub mod app;
pub mod enrich_ops;
mod feed_records;
pub mod file_ops;
pub mod gtfs_time;
mod processed_trip;
mod schedule_error;
mod stats_ops;
mod successor_tally;

pub use adjacency_ops::{build_adjacency, AdjacencySummary, AdjacencyTable};
pub use feed_records::{read_stop_times, read_trips, StopTimeRecord, TripAssignment};
pub use processed_trip::{group_trips, ProcessedTrip};
pub use schedule_error::ScheduleError;
pub use successor_tally::SuccessorTally;

/// fallback vehicle speed in meters per second used to infer a travel time
/// from a travel distance when no timing samples were observed.
pub const DEFAULT_FALLBACK_SPEED: f64 = 4.0;
