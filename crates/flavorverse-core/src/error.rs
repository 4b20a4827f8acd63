use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Operation failed: {0}")]
    Operation(String),

    #[error("Failed to load content feed '{feed}': {reason}")]
    ContentLoad { feed: String, reason: String },

    #[error("Unknown filter: {0}")]
    UnknownFilter(String),

    #[error("Invalid value for filter '{name}': {reason}")]
    InvalidFilterValue { name: String, reason: String },

    #[error("Preference store error: {0}")]
    Preference(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
