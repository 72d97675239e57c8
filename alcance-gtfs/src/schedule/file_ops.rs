use std::{
    io::{ErrorKind, Read, Write},
    path::Path,
};

use alcance_core::util::fs_utils::{self, OutputWriter};
use csv::QuoteStyle;

use crate::schedule::{AdjacencyTable, ScheduleError};

/// opens a GTFS table for reading, transparently decompressing `.gz` files.
pub fn open_reader(path: &Path) -> Result<Box<dyn Read>, ScheduleError> {
    fs_utils::open_reader(path).map_err(|source| ScheduleError::ReadError {
        filepath: path.display().to_string(),
        source,
    })
}

/// helper function to build a CSV file writer for either plain or `.gz` outputs
/// while respecting the user's overwrite preferences.
pub fn create_writer(
    path: &Path,
    has_headers: bool,
    quote_style: QuoteStyle,
    overwrite: bool,
) -> Result<csv::Writer<OutputWriter>, ScheduleError> {
    let filepath = path.display().to_string();
    let buffer = fs_utils::create_output(path, overwrite).map_err(|e| match e.kind() {
        ErrorKind::AlreadyExists => ScheduleError::OutputExistsError(filepath.clone()),
        _ => ScheduleError::WriteError {
            filepath: filepath.clone(),
            message: e.to_string(),
        },
    })?;
    let writer = csv::WriterBuilder::new()
        .has_headers(has_headers)
        .quote_style(quote_style)
        .from_writer(buffer);
    Ok(writer)
}

/// flushes a writer from [`create_writer`] and completes its file.
pub fn finish_writer(writer: csv::Writer<OutputWriter>, filepath: &str) -> Result<(), ScheduleError> {
    let output = writer.into_inner().map_err(|e| ScheduleError::WriteError {
        filepath: filepath.to_string(),
        message: e.error().to_string(),
    })?;
    output.finish().map_err(|e| ScheduleError::WriteError {
        filepath: filepath.to_string(),
        message: e.to_string(),
    })
}

/// writes every adjacency row, returning the number of rows written.
pub fn write_adjacency<W: Write>(
    writer: &mut csv::Writer<W>,
    table: &AdjacencyTable,
    filepath: &str,
) -> Result<usize, ScheduleError> {
    for row in table.rows.iter() {
        writer.serialize(row).map_err(|e| ScheduleError::WriteError {
            filepath: filepath.to_string(),
            message: e.to_string(),
        })?;
    }
    writer.flush().map_err(|e| ScheduleError::WriteError {
        filepath: filepath.to_string(),
        message: e.to_string(),
    })?;
    Ok(table.rows.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alcance_core::model::AdjacencyRow;

    #[test]
    fn test_written_table_reads_back_with_end_of_line() {
        let table = AdjacencyTable {
            rows: vec![
                AdjacencyRow {
                    route_id: String::from("r1"),
                    shape_id: String::from("s1"),
                    stop_id: String::from("a"),
                    next_stop_id: Some(String::from("b")),
                    travel_time_to_next: Some(90.0),
                    travel_distance_to_next: None,
                },
                AdjacencyRow {
                    route_id: String::from("r1"),
                    shape_id: String::from("s1"),
                    stop_id: String::from("b"),
                    next_stop_id: None,
                    travel_time_to_next: None,
                    travel_distance_to_next: None,
                },
            ],
        };
        let mut writer = csv::WriterBuilder::new()
            .has_headers(true)
            .from_writer(vec![]);
        let n = write_adjacency(&mut writer, &table, "memory").expect("should write");
        assert_eq!(n, 2);
        let bytes = writer.into_inner().expect("should flush");
        let text = String::from_utf8(bytes.clone()).expect("utf8");
        assert!(text.starts_with(
            "route_id,shape_id,stop_id,next_stop_id,travel_time_to_next,travel_distance_to_next"
        ));
        let rows = csv::Reader::from_reader(bytes.as_slice())
            .deserialize::<AdjacencyRow>()
            .collect::<Result<Vec<_>, _>>()
            .expect("should read back");
        assert_eq!(rows, table.rows);
    }

    #[test]
    fn test_gzip_table_complete_after_finish() {
        let dir = std::env::temp_dir().join(format!("alcance-gtfs-gz-{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("test invariant failed: temp dir");
        let path = dir.join("adjacency_by_route.txt.gz");
        let filepath = path.display().to_string();
        let table = AdjacencyTable {
            rows: vec![AdjacencyRow {
                route_id: String::from("60"),
                shape_id: String::from("s2"),
                stop_id: String::from("1001"),
                next_stop_id: None,
                travel_time_to_next: None,
                travel_distance_to_next: None,
            }],
        };
        let mut writer = create_writer(&path, true, QuoteStyle::Necessary, true)
            .expect("test invariant failed: create writer");
        write_adjacency(&mut writer, &table, &filepath).expect("should write");
        finish_writer(writer, &filepath).expect("should finish");

        let rows = csv::Reader::from_reader(open_reader(&path).expect("should open"))
            .deserialize::<AdjacencyRow>()
            .collect::<Result<Vec<_>, _>>()
            .expect("should decompress and parse");
        assert_eq!(rows, table.rows);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_existing_output_is_not_replaced() {
        let dir = std::env::temp_dir().join(format!("alcance-gtfs-out-{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("test invariant failed: temp dir");
        let path = dir.join("adjacency_by_route.txt");
        std::fs::write(&path, "keep me").expect("test invariant failed: seed file");
        let result = create_writer(&path, true, QuoteStyle::Necessary, false);
        assert!(matches!(result, Err(ScheduleError::OutputExistsError(_))));
        let contents = std::fs::read_to_string(&path).expect("should still exist");
        assert_eq!(contents, "keep me");
        let _ = std::fs::remove_dir_all(&dir);
    }
}
