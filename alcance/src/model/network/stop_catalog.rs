use std::{collections::HashMap, io::Read, path::Path};

use alcance_core::model::StopRow;
use kdam::tqdm;

use super::{
    table_ops::{open_reader, require_columns, table_reader},
    NetworkError, Stop,
};

/// all stops of a network snapshot, keyed by stop id.
#[derive(Debug, Clone, Default)]
pub struct StopCatalog {
    stops: HashMap<String, Stop>,
}

impl StopCatalog {
    pub fn from_file(path: &Path) -> Result<StopCatalog, NetworkError> {
        let reader = open_reader(path)?;
        Self::from_reader(reader, &path.display().to_string())
    }

    /// reads a GTFS `stops.txt` table. rows without an id or with missing or
    /// out-of-range coordinates are skipped and logged. when a stop id repeats,
    /// the first row wins.
    pub fn from_reader<R: Read>(reader: R, source_name: &str) -> Result<StopCatalog, NetworkError> {
        let mut rdr = table_reader(reader);
        require_columns(&mut rdr, source_name, &["stop_id", "stop_lat", "stop_lon"])?;
        let mut stops = HashMap::new();
        let mut skipped = 0;
        let iter = tqdm!(rdr.deserialize::<StopRow>().enumerate(), desc = "read stops");
        for (idx, result) in iter {
            let row = match result {
                Ok(row) => row,
                Err(e) => {
                    log::warn!("{source_name} row {}: skipping malformed row: {e}", idx + 1);
                    skipped += 1;
                    continue;
                }
            };
            let (Some(id), Some(coord)) = (row.id(), row.coord()) else {
                log::warn!(
                    "{source_name} row {}: skipping stop without id or valid coordinates",
                    idx + 1
                );
                skipped += 1;
                continue;
            };
            let name = row.stop_name.clone().unwrap_or_else(|| id.to_string());
            stops.entry(id.to_string()).or_insert(Stop {
                id: id.to_string(),
                name,
                coord,
            });
        }
        eprintln!();
        log::info!(
            "loaded {} stops from {source_name} ({skipped} rows skipped)",
            stops.len()
        );
        Ok(StopCatalog { stops })
    }

    pub fn get(&self, stop_id: &str) -> Option<&Stop> {
        self.stops.get(stop_id)
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}

impl FromIterator<Stop> for StopCatalog {
    fn from_iter<T: IntoIterator<Item = Stop>>(iter: T) -> Self {
        let stops = iter.into_iter().map(|s| (s.id.clone(), s)).collect();
        StopCatalog { stops }
    }
}
