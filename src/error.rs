// src/error.rs

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MoodlogError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database Error: {0}")]
    Sql(#[from] rusqlite::Error),

    #[error("Home directory not found")]
    HomeDirNotFound,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Editor exited with a non-zero status")]
    EditorError,

    #[error("Entry ID {0} not found")]
    EntryNotFound(i64),

    #[error("Entry content is empty")]
    EmptyContent,

    #[error("Database schema version {0} is newer than this build supports")]
    UnsupportedSchema(i32),
}

pub type Result<T> = std::result::Result<T, MoodlogError>;
