use super::GtfsOperation;
use clap::Parser;

/// command line tool for building the transit adjacency table from a GTFS snapshot
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct GtfsApp {
    #[command(subcommand)]
    pub op: GtfsOperation,
}
