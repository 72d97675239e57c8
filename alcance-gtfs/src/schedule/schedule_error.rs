#[derive(thiserror::Error, Debug)]
pub enum ScheduleError {
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
    #[error("failed writing '{filepath}': {message}")]
    WriteError { filepath: String, message: String },
    #[error("output file '{0}' already exists, pass --overwrite to replace it")]
    OutputExistsError(String),
    #[error("{0}")]
    OtherError(String),
}
