use std::path::{Path, PathBuf};

use clap::Subcommand;
use csv::QuoteStyle;
use serde::{Deserialize, Serialize};

use crate::schedule::{
    build_adjacency, enrich_ops,
    file_ops::{create_writer, finish_writer, open_reader, write_adjacency},
    group_trips, read_stop_times, read_trips, ProcessedTrip, ScheduleError,
    DEFAULT_FALLBACK_SPEED,
};

#[derive(Debug, Clone, Serialize, Deserialize, Subcommand)]
pub enum GtfsOperation {
    /// build the per route/shape stop adjacency table from trips and stop times
    BuildAdjacency {
        /// directory containing the GTFS text files
        #[arg(long)]
        data_dir: String,
        #[arg(long, default_value_t = String::from("trips.txt"))]
        trips: String,
        #[arg(long, default_value_t = String::from("stop_times.txt"))]
        stop_times: String,
        /// output file, defaults to adjacency_by_route.txt in the data directory.
        /// a `.gz` extension writes a gzip-compressed table.
        #[arg(long)]
        output: Option<String>,
        /// vehicle speed in meters per second used to infer a missing travel time
        #[arg(long, default_value_t = DEFAULT_FALLBACK_SPEED)]
        fallback_speed: f64,
        #[arg(long, default_value_t = false)]
        overwrite: bool,
    },
    /// append next/previous stop and serving route/shape ids to stops.txt
    EnrichStops {
        #[arg(long)]
        data_dir: String,
        #[arg(long, default_value_t = String::from("stops.txt"))]
        stops: String,
        #[arg(long, default_value_t = String::from("trips.txt"))]
        trips: String,
        #[arg(long, default_value_t = String::from("stop_times.txt"))]
        stop_times: String,
        /// output file, defaults to stops_enriched.txt in the data directory
        #[arg(long)]
        output: Option<String>,
        #[arg(long, default_value_t = false)]
        overwrite: bool,
    },
}

impl GtfsOperation {
    pub fn run(&self) -> Result<(), ScheduleError> {
        match self {
            GtfsOperation::BuildAdjacency {
                data_dir,
                trips,
                stop_times,
                output,
                fallback_speed,
                overwrite,
            } => {
                if !(fallback_speed.is_finite() && *fallback_speed > 0.0) {
                    return Err(ScheduleError::OtherError(format!(
                        "fallback speed must be a positive number, found {fallback_speed}"
                    )));
                }
                let data_dir = Path::new(data_dir);
                let processed = load_trips(data_dir, trips, stop_times)?;
                let (table, summary) = build_adjacency(&processed, *fallback_speed);

                let output_path = output_path(data_dir, output, "adjacency_by_route.txt");
                let filepath = output_path.display().to_string();
                let mut writer =
                    create_writer(&output_path, true, QuoteStyle::Necessary, *overwrite)?;
                let written = write_adjacency(&mut writer, &table, &filepath)?;
                finish_writer(writer, &filepath)?;
                log::info!(
                    "wrote {written} adjacency rows to {filepath}: {} trips, {} legs, {} end-of-line keys, {} inferred times, {} keys without a travel time",
                    summary.trips,
                    summary.legs,
                    summary.end_of_line_keys,
                    summary.inferred_times,
                    summary.missing_times
                );
                Ok(())
            }
            GtfsOperation::EnrichStops {
                data_dir,
                stops,
                trips,
                stop_times,
                output,
                overwrite,
            } => {
                let data_dir = Path::new(data_dir);
                let processed = load_trips(data_dir, trips, stop_times)?;
                let enrichment = enrich_ops::StopEnrichment::from_trips(&processed);

                let stops_path = data_dir.join(stops);
                let reader = open_reader(&stops_path)?;
                let output_path = output_path(data_dir, output, "stops_enriched.txt");
                let mut writer =
                    create_writer(&output_path, false, QuoteStyle::Necessary, *overwrite)?;
                let written = enrich_ops::enrich_stops(
                    reader,
                    &mut writer,
                    &enrichment,
                    &stops_path.display().to_string(),
                )?;
                finish_writer(writer, &output_path.display().to_string())?;
                log::info!(
                    "wrote {written} enriched stops to {}",
                    output_path.display()
                );
                Ok(())
            }
        }
    }
}

/// reads trips and stop times from the data directory and groups them into ordered trips.
fn load_trips(
    data_dir: &Path,
    trips_file: &str,
    stop_times_file: &str,
) -> Result<Vec<ProcessedTrip>, ScheduleError> {
    let trips_path = data_dir.join(trips_file);
    let trips = read_trips(open_reader(&trips_path)?, &trips_path.display().to_string())?;

    let stop_times_path = data_dir.join(stop_times_file);
    let (records, skipped) = read_stop_times(
        open_reader(&stop_times_path)?,
        &stop_times_path.display().to_string(),
    )?;
    log::info!(
        "read {} stop time rows from {} ({skipped} skipped)",
        records.len(),
        stop_times_path.display()
    );
    Ok(group_trips(records, &trips))
}

fn output_path(data_dir: &Path, output: &Option<String>, default_name: &str) -> PathBuf {
    match output {
        Some(o) => PathBuf::from(o),
        None => data_dir.join(default_name),
    }
}
