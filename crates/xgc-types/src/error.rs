use thiserror::Error;

#[derive(Error, Debug)]
pub enum XgcError {
    #[error("Invalid grid: {0}")]
    InvalidGrid(String),

    #[error("Invalid time range: {0}")]
    InvalidRange(String),

    #[error("No simulation output for time index {time_index}")]
    DataNotFound { time_index: usize },

    #[error("Configuration error: {0}")]
    InvalidConfiguration(String),

    #[error("Malformed mesh data: {0}")]
    MalformedData(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type XgcResult<T> = Result<T, XgcError>;
