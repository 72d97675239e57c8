use std::{collections::HashMap, io::Read};

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Deserialize;

use crate::schedule::{gtfs_time::parse_gtfs_time, ScheduleError};

/// route and shape a trip is assigned to in `trips.txt`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TripAssignment {
    pub route_id: String,
    pub shape_id: String,
}

/// a validated row of `stop_times.txt`.
#[derive(Debug, Clone, PartialEq)]
pub struct StopTimeRecord {
    pub trip_id: String,
    pub stop_sequence: u32,
    pub stop_id: String,
    /// arrival in seconds since the start of the service day
    pub arrival_time: Option<u32>,
    /// departure in seconds since the start of the service day
    pub departure_time: Option<u32>,
    /// cumulative distance along the shape, in the feed's distance unit
    pub shape_dist_traveled: Option<f64>,
}

impl StopTimeRecord {
    /// time this stop is left, falling back to the arrival when the departure is absent.
    pub fn leave_time(&self) -> Option<u32> {
        self.departure_time.or(self.arrival_time)
    }

    /// time this stop is reached, falling back to the departure when the arrival is absent.
    pub fn reach_time(&self) -> Option<u32> {
        self.arrival_time.or(self.departure_time)
    }
}

#[derive(Debug, Deserialize)]
struct TripRow {
    trip_id: Option<String>,
    route_id: Option<String>,
    shape_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StopTimeRow {
    trip_id: Option<String>,
    stop_sequence: Option<String>,
    stop_id: Option<String>,
    arrival_time: Option<String>,
    departure_time: Option<String>,
    shape_dist_traveled: Option<String>,
}

/// reads `trips.txt`, mapping each trip to its route and shape. rows without a
/// trip_id are skipped and logged.
///
/// # Arguments
///
/// * `reader` - source of the CSV content
/// * `source_name` - name of the source, used in messages
pub fn read_trips<R: Read>(
    reader: R,
    source_name: &str,
) -> Result<HashMap<String, TripAssignment>, ScheduleError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);
    let headers = read_headers(&mut rdr, source_name)?;
    require_columns(&headers, source_name, &["trip_id"])?;

    let mut trips = HashMap::new();
    let mut skipped = 0;
    for (idx, result) in rdr.deserialize::<TripRow>().enumerate() {
        let row = match result {
            Ok(row) => row,
            Err(e) => {
                log::warn!("{source_name} row {}: skipping malformed row: {e}", idx + 1);
                skipped += 1;
                continue;
            }
        };
        match non_empty(row.trip_id) {
            Some(trip_id) => {
                let assignment = TripAssignment {
                    route_id: row.route_id.unwrap_or_default(),
                    shape_id: row.shape_id.unwrap_or_default(),
                };
                trips.insert(trip_id, assignment);
            }
            None => {
                log::warn!("{source_name} row {}: skipping row without trip_id", idx + 1);
                skipped += 1;
            }
        }
    }
    log::info!(
        "loaded {} trips from {source_name} ({skipped} rows skipped)",
        trips.len()
    );
    Ok(trips)
}

/// reads `stop_times.txt`. a row is skipped (and logged) when it is missing a
/// trip or stop id, when its stop_sequence does not parse, or when a
/// non-empty time value is not a valid GTFS time. empty times are kept as
/// absent since GTFS allows them on non-timepoint stops.
///
/// # Returns
///
/// * the valid rows in file order, and the number of rows skipped
pub fn read_stop_times<R: Read>(
    reader: R,
    source_name: &str,
) -> Result<(Vec<StopTimeRecord>, usize), ScheduleError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);
    let headers = read_headers(&mut rdr, source_name)?;
    require_columns(&headers, source_name, &["trip_id", "stop_id", "stop_sequence"])?;

    let mut records = vec![];
    let mut skipped = 0;
    for (idx, result) in rdr.deserialize::<StopTimeRow>().enumerate() {
        let parsed = result
            .map_err(|e| format!("malformed row: {e}"))
            .and_then(StopTimeRecord::try_from);
        match parsed {
            Ok(record) => records.push(record),
            Err(msg) => {
                log::warn!("{source_name} row {}: skipping {msg}", idx + 1);
                skipped += 1;
            }
        }
    }
    log::info!(
        "loaded {} stop times from {source_name} ({skipped} rows skipped)",
        records.len()
    );
    Ok((records, skipped))
}

impl TryFrom<StopTimeRow> for StopTimeRecord {
    type Error = String;

    fn try_from(row: StopTimeRow) -> Result<Self, Self::Error> {
        let trip_id = non_empty(row.trip_id).ok_or("row without trip_id")?;
        let stop_id = non_empty(row.stop_id).ok_or("row without stop_id")?;
        let stop_sequence = row
            .stop_sequence
            .as_deref()
            .and_then(|s| s.parse::<u32>().ok())
            .ok_or_else(|| format!("row with invalid stop_sequence {:?}", row.stop_sequence))?;
        let arrival_time = optional_time(row.arrival_time, "arrival_time")?;
        let departure_time = optional_time(row.departure_time, "departure_time")?;
        let shape_dist_traveled = non_empty(row.shape_dist_traveled)
            .and_then(|s| s.parse::<f64>().ok())
            .filter(|d| d.is_finite());
        Ok(StopTimeRecord {
            trip_id,
            stop_sequence,
            stop_id,
            arrival_time,
            departure_time,
            shape_dist_traveled,
        })
    }
}

fn optional_time(value: Option<String>, column: &str) -> Result<Option<u32>, String> {
    match non_empty(value) {
        None => Ok(None),
        Some(s) => parse_gtfs_time(&s)
            .map(Some)
            .ok_or_else(|| format!("row with unparseable {column} '{s}'")),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

fn read_headers<R: Read>(
    rdr: &mut csv::Reader<R>,
    source_name: &str,
) -> Result<StringRecord, ScheduleError> {
    rdr.headers()
        .cloned()
        .map_err(|source| ScheduleError::CsvHeaderError {
            filepath: source_name.to_string(),
            source,
        })
}

pub(crate) fn require_columns(
    headers: &StringRecord,
    source_name: &str,
    columns: &[&str],
) -> Result<(), ScheduleError> {
    for column in columns {
        if !headers.iter().any(|h| h == *column) {
            return Err(ScheduleError::MissingColumnError {
                filepath: source_name.to_string(),
                column: column.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_trips_skips_missing_ids() {
        let csv = "route_id,service_id,trip_id,shape_id\n\
                   r1,wk,t1,s1\n\
                   r1,wk,,s1\n\
                   r2,wk,t2,\n";
        let trips = read_trips(csv.as_bytes(), "trips.txt").expect("should read");
        assert_eq!(trips.len(), 2);
        assert_eq!(trips["t1"].shape_id, "s1");
        assert_eq!(trips["t2"].route_id, "r2");
        assert_eq!(trips["t2"].shape_id, "");
    }

    #[test]
    fn test_read_stop_times_skips_malformed_rows() {
        let csv = "trip_id,arrival_time,departure_time,stop_id,stop_sequence,shape_dist_traveled\n\
                   t1,08:00:00,08:00:30,a,1,0\n\
                   t1,08:02:00,08:02:00,b,2,850.5\n\
                   t1,xx:00:00,08:03:00,c,3,\n\
                   t1,08:05:00,08:05:00,d,four,\n\
                   ,08:06:00,08:06:00,e,5,\n\
                   t1,,,f,6,\n";
        let (records, skipped) = read_stop_times(csv.as_bytes(), "stop_times.txt").expect("should read");
        assert_eq!(skipped, 3);
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].departure_time, Some(8 * 3600 + 30));
        assert_eq!(records[1].shape_dist_traveled, Some(850.5));
        assert_eq!(records[2].stop_id, "f");
        assert_eq!(records[2].leave_time(), None);
    }

    #[test]
    fn test_read_stop_times_requires_columns() {
        let csv = "trip_id,stop_id\nt1,a\n";
        let result = read_stop_times(csv.as_bytes(), "stop_times.txt");
        assert!(matches!(
            result,
            Err(ScheduleError::MissingColumnError { column, .. }) if column == "stop_sequence"
        ));
    }
}
