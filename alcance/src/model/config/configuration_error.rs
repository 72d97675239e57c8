#[derive(thiserror::Error, Debug)]
pub enum ConfigurationError {
    #[error("{msg}: {source}")]
    ConfigReadError {
        msg: String,
        source: config::ConfigError,
    },
    #[error("unsupported configuration file type: {0}")]
    UnsupportedFileType(String),
    #[error("invalid value for '{name}': {message}")]
    InvalidParameter { name: String, message: String },
}
