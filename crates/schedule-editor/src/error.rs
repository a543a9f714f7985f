//! Error types for schedule-editor operations.

use std::path::PathBuf;

use schedule_model::ScheduleError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error(transparent)]
    Model(#[from] ScheduleError),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Device error: {0}")]
    Device(String),

    #[error("No {0} file found on device or file is empty")]
    MissingRemoteFile(String),

    #[error("No file name set; use save-as")]
    NoFileName,

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Index out of range: {0}")]
    OutOfRange(String),
}

pub type Result<T> = std::result::Result<T, EditorError>;
