use std::{io::Write, path::PathBuf, sync::Arc};

use alcance_core::util::fs_utils::{create_output, open_reader, OutputWriter};
use clap::Subcommand;

use crate::{
    app::{cache::TimedMemoryCache, IsochroneService},
    model::{
        config::AlcanceConfiguration,
        isochrone::{IsochroneOutputFormat, IsochroneOutputMode, IsochroneRequest, TravelMode},
        network::{NetworkHandle, TransitNetwork},
    },
};

use super::{batch_ops, AppError};

#[derive(Debug, Clone, Subcommand)]
pub enum AlcanceOperation {
    /// compute one isochrone and print it
    Isochrone {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
        #[arg(long, value_enum, default_value_t = TravelMode::PublicTransport)]
        mode: TravelMode,
        /// time budget, from 5 to 120 minutes
        #[arg(long, default_value_t = 30)]
        minutes: u32,
        #[arg(long, value_enum, default_value_t = IsochroneOutputMode::Merged)]
        output_mode: IsochroneOutputMode,
        #[arg(long, value_enum, default_value_t = IsochroneOutputFormat::GeoJson)]
        format: IsochroneOutputFormat,
        /// output file, defaults to stdout. a `.gz` extension writes gzip
        #[arg(long)]
        output: Option<PathBuf>,
        #[arg(long, default_value_t = false)]
        overwrite: bool,
    },
    /// list every reachable stop with the walking radius left on arrival, as CSV
    Areas {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
        #[arg(long, default_value_t = 30)]
        minutes: u32,
        #[arg(long)]
        output: Option<PathBuf>,
        #[arg(long, default_value_t = false)]
        overwrite: bool,
    },
    /// compute isochrones for every origin in a CSV file (columns id, lat, lon,
    /// minutes, mode), writing one result per line in input order
    Batch {
        #[arg(long)]
        origins: PathBuf,
        /// mode used for rows without one
        #[arg(long, value_enum, default_value_t = TravelMode::PublicTransport)]
        mode: TravelMode,
        /// budget used for rows without one
        #[arg(long, default_value_t = 30)]
        minutes: u32,
        #[arg(long, value_enum, default_value_t = IsochroneOutputMode::Merged)]
        output_mode: IsochroneOutputMode,
        #[arg(long, value_enum, default_value_t = IsochroneOutputFormat::GeoJson)]
        format: IsochroneOutputFormat,
        #[arg(long)]
        output: Option<PathBuf>,
        #[arg(long, default_value_t = false)]
        overwrite: bool,
    },
}

impl AlcanceOperation {
    pub fn run(&self, conf: &AlcanceConfiguration) -> Result<(), AppError> {
        let network = TransitNetwork::from_config(&conf.network)?;
        if network.is_empty() {
            log::warn!("no transit service configured, transit isochrones cover the origin walk only");
        }
        let service = IsochroneService::new(
            Arc::new(NetworkHandle::new(network)),
            conf.parameters.clone(),
        )
        .with_cache(Arc::new(TimedMemoryCache::default()));

        match self {
            AlcanceOperation::Isochrone {
                lat,
                lon,
                mode,
                minutes,
                output_mode,
                format,
                output,
                overwrite,
            } => {
                let request =
                    IsochroneRequest::new(*lat, *lon, *mode, *minutes)?.with_output_mode(*output_mode);
                let isochrone = service.isochrone(&request);
                let line = format.serialize_isochrone(&isochrone, None)?;
                let (mut writer, destination) = open_output(output, *overwrite)?;
                writeln!(writer, "{line}")
                    .and_then(|_| writer.finish())
                    .map_err(|source| AppError::WriteError {
                        destination,
                        source,
                    })
            }
            AlcanceOperation::Areas {
                lat,
                lon,
                minutes,
                output,
                overwrite,
            } => {
                let request = IsochroneRequest::new(*lat, *lon, TravelMode::PublicTransport, *minutes)?;
                let rows = service.stop_areas(&request);
                let (writer, destination) = open_output(output, *overwrite)?;
                let mut writer = csv::Writer::from_writer(writer);
                for row in rows.iter() {
                    writer
                        .serialize(row)
                        .map_err(|source| AppError::CsvWriteError {
                            destination: destination.clone(),
                            source,
                        })?;
                }
                writer
                    .into_inner()
                    .map_err(|e| e.into_error())
                    .and_then(OutputWriter::finish)
                    .map_err(|source| AppError::WriteError {
                        destination: destination.clone(),
                        source,
                    })?;
                log::info!("wrote {} reachable stop areas to {destination}", rows.len());
                Ok(())
            }
            AlcanceOperation::Batch {
                origins,
                mode,
                minutes,
                output_mode,
                format,
                output,
                overwrite,
            } => {
                let (mut writer, destination) = open_output(output, *overwrite)?;
                let options = batch_ops::BatchOptions {
                    default_mode: *mode,
                    default_minutes: *minutes,
                    output_mode: *output_mode,
                    format: *format,
                };
                let source_name = origins.display().to_string();
                let reader = open_reader(origins).map_err(|e| AppError::OriginsReadError {
                    filepath: source_name.clone(),
                    source: csv::Error::from(e),
                })?;
                let summary = batch_ops::run_batch(
                    &service,
                    reader,
                    &source_name,
                    &options,
                    &mut writer,
                    &destination,
                )?;
                writer.finish().map_err(|source| AppError::WriteError {
                    destination: destination.clone(),
                    source,
                })?;
                log::info!(
                    "wrote {} isochrones to {destination}, skipped {} origin rows",
                    summary.written,
                    summary.skipped
                );
                Ok(())
            }
        }
    }
}

/// output file, or stdout when no path is given, plus a name for messages
fn open_output(
    output: &Option<PathBuf>,
    overwrite: bool,
) -> Result<(OutputWriter, String), AppError> {
    match output {
        None => Ok((OutputWriter::stdout(), String::from("stdout"))),
        Some(path) => {
            let destination = path.display().to_string();
            let writer = create_output(path, overwrite).map_err(|source| AppError::WriteError {
                destination: destination.clone(),
                source,
            })?;
            Ok((writer, destination))
        }
    }
}
