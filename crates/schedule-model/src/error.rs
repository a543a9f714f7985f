//! Error types for schedule-model operations.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unknown event type: {0}")]
    UnknownEventKind(String),

    #[error("Unknown day of week: {0}")]
    UnknownDay(String),
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
