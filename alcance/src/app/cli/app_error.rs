use crate::model::{config::ConfigurationError, isochrone::IsochroneError, network::NetworkError};

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    ConfigurationError(#[from] ConfigurationError),
    #[error(transparent)]
    NetworkError(#[from] NetworkError),
    #[error(transparent)]
    IsochroneError(#[from] IsochroneError),
    #[error("failed reading origins file '{filepath}': {source}")]
    OriginsReadError {
        filepath: String,
        source: csv::Error,
    },
    #[error("failed writing '{destination}': {source}")]
    WriteError {
        destination: String,
        source: std::io::Error,
    },
    #[error("failed writing CSV to '{destination}': {source}")]
    CsvWriteError {
        destination: String,
        source: csv::Error,
    },
    #[error("{0}")]
    InternalError(String),
}
