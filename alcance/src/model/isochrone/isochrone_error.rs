#[derive(thiserror::Error, Debug)]
pub enum IsochroneError {
    #[error("time budget must be between {min} and {max} minutes, found {found}")]
    InvalidTimeBudget { min: u32, max: u32, found: u32 },
    #[error("invalid origin ({lat}, {lon}): {message}")]
    InvalidOrigin { lat: f64, lon: f64, message: String },
    #[error("failure serializing isochrone: {source}")]
    SerializationError {
        #[from]
        source: serde_json::Error,
    },
    #[error("{0}")]
    InternalError(String),
}
