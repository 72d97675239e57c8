use std::collections::HashMap;

use alcance_core::model::{AdjacencyRow, RouteShapeKey};
use indexmap::IndexMap;

use crate::schedule::{
    gtfs_time::travel_seconds, stats_ops::median, ProcessedTrip, StopTimeRecord, SuccessorTally,
};

/// (route, shape, stop) key of the adjacency table.
type AdjacencyKey = (RouteShapeKey, String);

/// the resolved adjacency table: one row per (route_id, shape_id, stop_id).
#[derive(Debug, Clone, Default)]
pub struct AdjacencyTable {
    pub rows: Vec<AdjacencyRow>,
}

/// counts collected while building the table, reported once the build finishes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdjacencySummary {
    pub trips: usize,
    pub legs: usize,
    pub keys: usize,
    pub end_of_line_keys: usize,
    pub inferred_times: usize,
    pub missing_times: usize,
}

/// observed timing samples for one (key, successor) pair.
#[derive(Debug, Default)]
struct LegSamples {
    times: Vec<f64>,
    distances: Vec<f64>,
}

/// builds the stop adjacency table from trips with ordered stop times.
///
/// for every consecutive (current, next) pair of every trip, `next` is recorded as a
/// candidate successor of `current` under (route_id, shape_id, current_stop). each key
/// is then resolved to its majority successor (first-seen on ties), and the travel time
/// and distance are the medians of the samples observed for that key and successor.
/// when no timing sample exists but a distance does, the time is inferred as
/// `distance / fallback_speed`.
///
/// # Arguments
///
/// * `trips` - trips grouped and ordered by stop_sequence
/// * `fallback_speed` - speed in meters per second used for inferred travel times
///
/// # Returns
///
/// * the table, sorted by route_id then shape_id with stops in first-seen order,
///   along with a summary of the build
pub fn build_adjacency(
    trips: &[ProcessedTrip],
    fallback_speed: f64,
) -> (AdjacencyTable, AdjacencySummary) {
    let mut tallies: IndexMap<AdjacencyKey, SuccessorTally> = IndexMap::new();
    let mut samples: HashMap<(AdjacencyKey, String), LegSamples> = HashMap::new();
    let mut summary = AdjacencySummary {
        trips: trips.len(),
        ..Default::default()
    };

    for trip in trips.iter() {
        let route_shape = RouteShapeKey::new(&trip.assignment.route_id, &trip.assignment.shape_id);
        for (src, dst) in trip.legs() {
            let key = (route_shape.clone(), src.stop_id.clone());
            tallies.entry(key.clone()).or_default().observe(&dst.stop_id);
            summary.legs += 1;

            let leg = samples.entry((key, dst.stop_id.clone())).or_default();
            if let Some(dt) = leg_travel_time(src, dst) {
                leg.times.push(dt);
            }
            if let Some(dd) = leg_distance(src, dst) {
                leg.distances.push(dd);
            }
        }
        // the final stop still gets a row so that end-of-line stops can be located
        if let Some(last) = trip.last_stop() {
            tallies
                .entry((route_shape.clone(), last.stop_id.clone()))
                .or_default();
        }
    }

    let mut rows = Vec::with_capacity(tallies.len());
    for ((route_shape, stop_id), tally) in tallies.iter() {
        let next_stop_id = tally.resolve().map(String::from);
        let (travel_time, travel_distance) = match &next_stop_id {
            None => {
                summary.end_of_line_keys += 1;
                (None, None)
            }
            Some(next) => {
                let key = ((route_shape.clone(), stop_id.clone()), next.clone());
                let (time, distance) = match samples.get(&key) {
                    Some(s) => (median(&s.times), median(&s.distances)),
                    None => (None, None),
                };
                let time = match (time, distance) {
                    (Some(t), _) => Some(t),
                    (None, Some(d)) if fallback_speed > 0.0 => {
                        summary.inferred_times += 1;
                        Some(d / fallback_speed)
                    }
                    _ => {
                        summary.missing_times += 1;
                        None
                    }
                };
                (time, distance)
            }
        };
        rows.push(AdjacencyRow {
            route_id: route_shape.route_id.clone(),
            shape_id: route_shape.shape_id.clone(),
            stop_id: stop_id.clone(),
            next_stop_id,
            travel_time_to_next: travel_time,
            travel_distance_to_next: travel_distance,
        });
    }
    // stable sort keeps first-seen stop order within each route/shape
    rows.sort_by(|a, b| (&a.route_id, &a.shape_id).cmp(&(&b.route_id, &b.shape_id)));
    summary.keys = rows.len();

    (AdjacencyTable { rows }, summary)
}

fn leg_travel_time(src: &StopTimeRecord, dst: &StopTimeRecord) -> Option<f64> {
    let departure = src.leave_time()?;
    let arrival = dst.reach_time()?;
    travel_seconds(departure, arrival)
}

fn leg_distance(src: &StopTimeRecord, dst: &StopTimeRecord) -> Option<f64> {
    let delta = dst.shape_dist_traveled? - src.shape_dist_traveled?;
    if delta < 0.0 {
        None
    } else {
        Some(delta)
    }
}
