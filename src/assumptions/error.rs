//! Errors raised while loading or editing assumptions

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssumptionsError {
    #[error("failed to read assumptions: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed assumptions CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed assumptions JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown assumption field: {0}")]
    UnknownField(String),

    #[error("invalid value {value:?} for assumption {field}")]
    InvalidValue { field: String, value: String },

    #[error("unsupported assumptions format: {} (expected .json or .csv)", .0.display())]
    UnsupportedFormat(PathBuf),
}
