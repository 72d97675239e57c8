use std::{
    fs::{File, OpenOptions},
    io::{BufReader, BufWriter, ErrorKind, Read, Stdout, Write},
    path::Path,
};

use flate2::{read::GzDecoder, write::GzEncoder, Compression};

/// true if the file extension marks a gzip-compressed table.
pub fn is_gzip(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("gz")
}

/// opens a tabular text file for reading, transparently decompressing `.gz` files.
pub fn open_reader(path: &Path) -> std::io::Result<Box<dyn Read>> {
    let file = File::open(path)?;
    if is_gzip(path) {
        Ok(Box::new(GzDecoder::new(BufReader::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// destination of a written table. buffered bytes and the gzip trailer are only
/// guaranteed on disk after [`OutputWriter::finish`] returns `Ok`.
pub enum OutputWriter {
    Stdout(Stdout),
    Plain(BufWriter<File>),
    Gzip(GzEncoder<BufWriter<File>>),
}

impl OutputWriter {
    pub fn stdout() -> OutputWriter {
        OutputWriter::Stdout(std::io::stdout())
    }

    /// flushes the output. gzip outputs also write their trailer here, so errors
    /// that would otherwise surface while dropping the encoder are reported.
    pub fn finish(self) -> std::io::Result<()> {
        match self {
            OutputWriter::Stdout(mut out) => out.flush(),
            OutputWriter::Plain(mut out) => out.flush(),
            OutputWriter::Gzip(encoder) => encoder.finish()?.flush(),
        }
    }
}

impl Write for OutputWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self {
            OutputWriter::Stdout(out) => out.write(buf),
            OutputWriter::Plain(out) => out.write(buf),
            OutputWriter::Gzip(out) => out.write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self {
            OutputWriter::Stdout(out) => out.flush(),
            OutputWriter::Plain(out) => out.flush(),
            OutputWriter::Gzip(out) => out.flush(),
        }
    }
}

/// creates an output file, compressing with gzip when the path ends with `.gz`.
/// an existing file is only replaced when `overwrite` is set, otherwise an
/// [`ErrorKind::AlreadyExists`] error is returned.
pub fn create_output(path: &Path, overwrite: bool) -> std::io::Result<OutputWriter> {
    let file = if overwrite {
        File::create(path)?
    } else {
        OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => std::io::Error::new(
                    ErrorKind::AlreadyExists,
                    format!("{} already exists", path.display()),
                ),
                _ => e,
            })?
    };
    let buffered = BufWriter::new(file);
    if is_gzip(path) {
        Ok(OutputWriter::Gzip(GzEncoder::new(buffered, Compression::default())))
    } else {
        Ok(OutputWriter::Plain(buffered))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gzip_detection() {
        assert!(is_gzip(Path::new("data/adjacency_by_route.txt.gz")));
        assert!(!is_gzip(Path::new("data/adjacency_by_route.txt")));
        assert!(!is_gzip(Path::new("data/gz")));
    }

    #[test]
    fn test_gzip_output_reads_back() {
        let dir = std::env::temp_dir().join(format!("alcance-core-fs-{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("test invariant failed: temp dir");
        let path = dir.join("table.txt.gz");
        let mut out = create_output(&path, true).expect("should create");
        assert!(matches!(out, OutputWriter::Gzip(_)));
        out.write_all(b"stop_id\na\n").expect("should write");
        out.finish().expect("should write the gzip trailer");
        let mut text = String::new();
        open_reader(&path)
            .expect("should open")
            .read_to_string(&mut text)
            .expect("should decompress");
        assert_eq!(text, "stop_id\na\n");

        let again = create_output(&path, false);
        assert!(matches!(again, Err(e) if e.kind() == ErrorKind::AlreadyExists));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_finished_gzip_output_has_trailer() {
        let dir = std::env::temp_dir().join(format!("alcance-core-trailer-{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("test invariant failed: temp dir");
        let path = dir.join("stops.txt.gz");
        let mut out = create_output(&path, true).expect("should create");
        out.write_all(b"stop_id\n").expect("should write");
        out.finish().expect("should finish");
        let bytes = std::fs::read(&path).expect("should read");
        // gzip member: 10 byte header, deflate data, crc32 then uncompressed size
        assert!(bytes.len() > 18);
        assert_eq!(&bytes[..2], &[0x1f, 0x8b]);
        let size = u32::from_le_bytes([
            bytes[bytes.len() - 4],
            bytes[bytes.len() - 3],
            bytes[bytes.len() - 2],
            bytes[bytes.len() - 1],
        ]);
        assert_eq!(size, 8);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
