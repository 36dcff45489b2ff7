//! Error types for the draftdex dataset engine

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DexError>;

#[derive(Error, Debug)]
pub enum DexError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("dex provider error: {message}")]
    Provider { message: String },

    #[error("no dataset found for generation {generation}")]
    MissingGeneration { generation: u8 },

    #[error("unknown sort field: {field}")]
    UnknownSortField { field: String },

    #[error("invalid pagination: page and page size must be >= 1")]
    InvalidPagination,

    #[error("unknown pokemon type: {name}")]
    UnknownType { name: String },

    #[error("unknown move category: {name}")]
    UnknownCategory { name: String },

    #[error("{kind} not found: {name}")]
    NotFound { kind: &'static str, name: String },

    #[error("storage error: {message}")]
    Storage { message: String },
}

impl From<anyhow::Error> for DexError {
    fn from(err: anyhow::Error) -> Self {
        DexError::Storage {
            message: err.to_string(),
        }
    }
}
