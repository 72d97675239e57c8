use std::{
    io::{Read, Write},
    sync::{Arc, Mutex},
};

use kdam::{Bar, BarExt};
use rayon::prelude::*;

use crate::{
    app::IsochroneService,
    model::isochrone::{IsochroneOutputFormat, IsochroneOutputMode, IsochroneRequest, TravelMode},
};

use super::{AppError, OriginRow};

#[derive(Debug, Clone, Copy)]
pub struct BatchOptions {
    pub default_mode: TravelMode,
    pub default_minutes: u32,
    pub output_mode: IsochroneOutputMode,
    pub format: IsochroneOutputFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub written: usize,
    pub skipped: usize,
}

/// computes an isochrone for every usable row of an origins table, in parallel
/// against the service's current snapshot, and writes one line per origin in input
/// order. unusable rows are logged and skipped.
pub fn run_batch<R: Read, W: Write>(
    service: &IsochroneService,
    origins: R,
    source_name: &str,
    options: &BatchOptions,
    mut writer: W,
    destination: &str,
) -> Result<BatchSummary, AppError> {
    let (requests, skipped) = read_origins(origins, source_name, options)?;

    let bar = Bar::builder()
        .desc("isochrones")
        .total(requests.len())
        .build()
        .map_err(AppError::InternalError)?;
    let bar = Arc::new(Mutex::new(bar));
    let lines = requests
        .par_iter()
        .map(|(id, request)| {
            let isochrone = service.isochrone(request);
            if let Ok(mut bar) = bar.lock() {
                let _ = bar.update(1);
            }
            options.format.serialize_isochrone(&isochrone, id.as_deref())
        })
        .collect::<Result<Vec<_>, _>>()?;
    eprintln!();

    for line in lines.iter() {
        writeln!(writer, "{line}").map_err(|source| AppError::WriteError {
            destination: destination.to_string(),
            source,
        })?;
    }
    writer.flush().map_err(|source| AppError::WriteError {
        destination: destination.to_string(),
        source,
    })?;
    Ok(BatchSummary {
        written: lines.len(),
        skipped,
    })
}

type OriginRequest = (Option<String>, IsochroneRequest);

fn read_origins<R: Read>(
    origins: R,
    source_name: &str,
    options: &BatchOptions,
) -> Result<(Vec<OriginRequest>, usize), AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(origins);
    let headers = reader
        .headers()
        .map_err(|source| AppError::OriginsReadError {
            filepath: source_name.to_string(),
            source,
        })?;
    for column in ["lat", "lon"] {
        if !headers.iter().any(|h| h == column) {
            return Err(AppError::InternalError(format!(
                "origins file '{source_name}' is missing required column '{column}'"
            )));
        }
    }

    let mut requests = vec![];
    let mut skipped = 0;
    for (idx, row) in reader.deserialize::<OriginRow>().enumerate() {
        let parsed = row.map_err(|e| e.to_string()).and_then(|row| {
            let request = row.to_request(options.default_mode, options.default_minutes)?;
            Ok((row.id, request.with_output_mode(options.output_mode)))
        });
        match parsed {
            Ok(origin) => requests.push(origin),
            Err(message) => {
                log::warn!("{source_name} row {}: {message}, skipping", idx + 1);
                skipped += 1;
            }
        }
    }
    log::info!(
        "read {} origins from {source_name} ({skipped} skipped)",
        requests.len()
    );
    Ok((requests, skipped))
}
