#[derive(thiserror::Error, Debug)]
pub enum NetworkError {
    #[error("failed reading '{filepath}': {source}")]
    ReadError {
        filepath: String,
        source: std::io::Error,
    },
    #[error("failed reading CSV header of '{filepath}': {source}")]
    CsvHeaderError {
        filepath: String,
        source: csv::Error,
    },
    #[error("'{filepath}' is missing required column '{column}'")]
    MissingColumnError { filepath: String, column: String },
    #[error("failure decoding line asset '{filepath}': {source}")]
    LineAssetDecodeError {
        filepath: String,
        source: serde_json::Error,
    },
    #[error("invalid line asset '{filepath}': {message}")]
    InvalidLineAsset { filepath: String, message: String },
    #[error("adjacency table '{0}' requires a stops file to locate its stops")]
    MissingStopsFile(String),
}
