use std::path::PathBuf;

use clap::Parser;

use crate::model::config::AlcanceConfiguration;

use super::{AlcanceOperation, AppError};

/// walking plus public transit isochrones from a GTFS-derived adjacency table
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct AlcanceApp {
    /// TOML or JSON configuration file. without one, defaults plus `ALCANCE__`
    /// environment overrides are used
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub op: AlcanceOperation,
}

impl AlcanceApp {
    pub fn run(&self) -> Result<(), AppError> {
        let conf = match &self.config {
            Some(path) => AlcanceConfiguration::from_file(path)?,
            None => AlcanceConfiguration::from_env()?,
        };
        self.op.run(&conf)
    }
}
