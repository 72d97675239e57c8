use std::{io::Read, path::Path};

use alcance_core::util::fs_utils;
use csv::{Reader, ReaderBuilder, StringRecord, Trim};

use super::NetworkError;

pub fn open_reader(path: &Path) -> Result<Box<dyn Read>, NetworkError> {
    fs_utils::open_reader(path).map_err(|source| NetworkError::ReadError {
        filepath: path.display().to_string(),
        source,
    })
}

/// CSV reader configured for GTFS-style tables: headers, trimmed fields, and
/// tolerance for rows with a different number of fields.
pub fn table_reader<R: Read>(reader: R) -> Reader<R> {
    ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader)
}

/// reads the header row and confirms the required columns are present.
pub fn require_columns<R: Read>(
    rdr: &mut Reader<R>,
    source_name: &str,
    columns: &[&str],
) -> Result<StringRecord, NetworkError> {
    let headers = rdr
        .headers()
        .cloned()
        .map_err(|source| NetworkError::CsvHeaderError {
            filepath: source_name.to_string(),
            source,
        })?;
    for column in columns {
        if !headers.iter().any(|h| h == *column) {
            return Err(NetworkError::MissingColumnError {
                filepath: source_name.to_string(),
                column: column.to_string(),
            });
        }
    }
    Ok(headers)
}
