use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid entity id: {0}")]
    InvalidEntityId(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid data: {0}")]
    InvalidData(String),
}

pub type Result<T> = std::result::Result<T, Error>;
