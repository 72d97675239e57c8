use std::collections::{BinaryHeap, HashMap};

use indexmap::IndexMap;
use kdam::tqdm;

use crate::schedule::{StopTimeRecord, TripAssignment};

/// a trip with its stop times in travel order, prepared for adjacency processing.
pub struct ProcessedTrip {
    /// GTFS trip identifier
    pub trip_id: String,
    /// route and shape taken from trips.txt. trips missing from trips.txt
    /// are kept with empty route and shape ids.
    pub assignment: TripAssignment,
    /// list of [`StopTimeRecord`] values associated with this trip in sorted order
    pub stop_times: Vec<StopTimeRecord>,
}

impl ProcessedTrip {
    pub fn new(
        trip_id: String,
        assignment: TripAssignment,
        stop_times: Vec<StopTimeRecord>,
    ) -> ProcessedTrip {
        ProcessedTrip {
            trip_id,
            assignment,
            stop_times: get_ordered_stops(stop_times),
        }
    }

    /// consecutive (current, next) stop time pairs along this trip.
    pub fn legs(&self) -> impl Iterator<Item = (&StopTimeRecord, &StopTimeRecord)> {
        self.stop_times.windows(2).map(|w| (&w[0], &w[1]))
    }

    pub fn last_stop(&self) -> Option<&StopTimeRecord> {
        self.stop_times.last()
    }
}

/// groups stop time rows by trip, preserving the order in which trips first appear.
pub fn group_trips(
    stop_times: Vec<StopTimeRecord>,
    trips: &HashMap<String, TripAssignment>,
) -> Vec<ProcessedTrip> {
    let total = stop_times.len();
    let mut by_trip: IndexMap<String, Vec<StopTimeRecord>> = IndexMap::new();
    let iter = tqdm!(
        stop_times.into_iter(),
        total = total,
        desc = "group stop times by trip"
    );
    for record in iter {
        by_trip
            .entry(record.trip_id.clone())
            .or_default()
            .push(record);
    }
    eprintln!();

    by_trip
        .into_iter()
        .map(|(trip_id, rows)| {
            let assignment = match trips.get(&trip_id) {
                Some(a) => a.clone(),
                None => {
                    log::debug!("trip '{trip_id}' has stop times but no trips.txt entry");
                    TripAssignment::default()
                }
            };
            ProcessedTrip::new(trip_id, assignment, rows)
        })
        .collect()
}

/// Returns an ordered (ascending) vector of [StopTimeRecord]. Internally uses [BinaryHeap] to sort,
/// keyed on (stop_sequence, original index) so rows sharing a sequence value keep their file order.
fn get_ordered_stops(stop_times: Vec<StopTimeRecord>) -> Vec<StopTimeRecord> {
    let stop_queue_order: BinaryHeap<(u32, usize)> = stop_times
        .iter()
        .enumerate()
        .map(|(i, st)| (st.stop_sequence, i))
        .collect();

    let mut slots: Vec<Option<StopTimeRecord>> = stop_times.into_iter().map(Some).collect();
    stop_queue_order
        .into_sorted_vec() // Ascending according to documentation
        .into_iter()
        .filter_map(|(_, idx)| slots.get_mut(idx).and_then(Option::take))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn st(trip_id: &str, seq: u32, stop_id: &str) -> StopTimeRecord {
        StopTimeRecord {
            trip_id: trip_id.to_string(),
            stop_sequence: seq,
            stop_id: stop_id.to_string(),
            arrival_time: None,
            departure_time: None,
            shape_dist_traveled: None,
        }
    }

    #[test]
    fn test_stop_orders_by_stop_sequence() {
        let rows = vec![st("t1", 3, "c"), st("t1", 1, "a"), st("t1", 20, "d"), st("t1", 2, "b")];
        let trip = ProcessedTrip::new(String::from("t1"), TripAssignment::default(), rows);
        let ids: Vec<&str> = trip.stop_times.iter().map(|s| s.stop_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c", "d"]);
        assert_eq!(trip.legs().count(), 3);
    }

    #[test]
    fn test_group_trips_keeps_first_seen_order() {
        let rows = vec![
            st("t2", 1, "x"),
            st("t1", 1, "a"),
            st("t2", 2, "y"),
            st("t1", 2, "b"),
        ];
        let mut trips = HashMap::new();
        trips.insert(
            String::from("t1"),
            TripAssignment {
                route_id: String::from("r1"),
                shape_id: String::from("s1"),
            },
        );
        let grouped = group_trips(rows, &trips);
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].trip_id, "t2");
        assert_eq!(grouped[0].assignment, TripAssignment::default());
        assert_eq!(grouped[1].assignment.route_id, "r1");
        assert_eq!(grouped[1].stop_times.len(), 2);
    }
}
