use std::{
    collections::{BTreeSet, HashMap},
    io::{Read, Write},
};

use csv::{ReaderBuilder, StringRecord};
use itertools::Itertools;

use crate::schedule::{feed_records::require_columns, ProcessedTrip, ScheduleError, SuccessorTally};

/// columns appended to each `stops.txt` row.
pub const ENRICHED_COLUMNS: [&str; 4] = ["next_stop_id", "prev_stop_id", "route_ids", "shape_ids"];

/// per-stop annotations derived from the trips that serve each stop, regardless of route.
#[derive(Debug, Default)]
pub struct StopEnrichment {
    next_counts: HashMap<String, SuccessorTally>,
    prev_counts: HashMap<String, SuccessorTally>,
    routes: HashMap<String, BTreeSet<String>>,
    shapes: HashMap<String, BTreeSet<String>>,
}

impl StopEnrichment {
    pub fn from_trips(trips: &[ProcessedTrip]) -> StopEnrichment {
        let mut result = StopEnrichment::default();
        for trip in trips.iter() {
            for (src, dst) in trip.legs() {
                result
                    .next_counts
                    .entry(src.stop_id.clone())
                    .or_default()
                    .observe(&dst.stop_id);
                result
                    .prev_counts
                    .entry(dst.stop_id.clone())
                    .or_default()
                    .observe(&src.stop_id);
            }
            for stop_time in trip.stop_times.iter() {
                let route_id = &trip.assignment.route_id;
                let shape_id = &trip.assignment.shape_id;
                if !route_id.is_empty() {
                    result
                        .routes
                        .entry(stop_time.stop_id.clone())
                        .or_default()
                        .insert(route_id.clone());
                }
                if !shape_id.is_empty() {
                    result
                        .shapes
                        .entry(stop_time.stop_id.clone())
                        .or_default()
                        .insert(shape_id.clone());
                }
            }
        }
        result
    }

    /// values for [`ENRICHED_COLUMNS`] for one stop. unknown stops get empty values.
    pub fn columns_for(&self, stop_id: &str) -> [String; 4] {
        let majority = |counts: &HashMap<String, SuccessorTally>| {
            counts
                .get(stop_id)
                .and_then(|t| t.resolve())
                .map(String::from)
                .unwrap_or_default()
        };
        let joined = |sets: &HashMap<String, BTreeSet<String>>| {
            sets.get(stop_id).map(|s| s.iter().join(";")).unwrap_or_default()
        };
        [
            majority(&self.next_counts),
            majority(&self.prev_counts),
            joined(&self.routes),
            joined(&self.shapes),
        ]
    }
}

/// copies every `stops.txt` row to the writer with the enrichment columns appended.
/// rows are passed through unchanged, including rows this crate would otherwise reject.
///
/// # Returns
///
/// * number of rows written
pub fn enrich_stops<R: Read, W: Write>(
    stops: R,
    writer: &mut csv::Writer<W>,
    enrichment: &StopEnrichment,
    source_name: &str,
) -> Result<usize, ScheduleError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(stops);
    let headers = rdr
        .headers()
        .cloned()
        .map_err(|source| ScheduleError::CsvHeaderError {
            filepath: source_name.to_string(),
            source,
        })?;
    require_columns(&headers, source_name, &["stop_id"])?;
    let stop_id_idx = headers.iter().position(|h| h == "stop_id").unwrap_or(0);
    let write_err = |e: csv::Error| ScheduleError::WriteError {
        filepath: String::from("enriched stops"),
        message: e.to_string(),
    };

    let mut out_headers = headers.clone();
    for column in ENRICHED_COLUMNS {
        out_headers.push_field(column);
    }
    writer.write_record(&out_headers).map_err(write_err)?;

    let mut written = 0;
    for (idx, result) in rdr.records().enumerate() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                log::warn!("{source_name} row {}: skipping malformed row: {e}", idx + 1);
                continue;
            }
        };
        let mut out = StringRecord::from(record.iter().collect::<Vec<_>>());
        // pad short rows so the appended columns line up with the header
        while out.len() < headers.len() {
            out.push_field("");
        }
        let stop_id = record.get(stop_id_idx).unwrap_or_default().trim();
        for value in enrichment.columns_for(stop_id) {
            out.push_field(&value);
        }
        writer.write_record(&out).map_err(write_err)?;
        written += 1;
    }
    writer.flush().map_err(|e| ScheduleError::WriteError {
        filepath: String::from("enriched stops"),
        message: e.to_string(),
    })?;
    Ok(written)
}
