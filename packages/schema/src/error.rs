use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid identifier: {0:?}")]
    InvalidId(String),
}
