//! JSON persistence for schedule collections.
//!
//! The text format is plain `serde_json`; callers only rely on round-tripping
//! preserving every event field, the schedule order and the timezone.

use std::path::Path;

use tracing::debug;

use crate::collection::ScheduleCollection;
use crate::error::{Result, ScheduleError};

/// Encode a collection as pretty-printed JSON.
pub fn serialize_collection(collection: &ScheduleCollection) -> Result<String> {
    Ok(serde_json::to_string_pretty(collection)?)
}

/// Decode a collection from JSON text.
pub fn deserialize_collection(text: &str) -> Result<ScheduleCollection> {
    Ok(serde_json::from_str(text)?)
}

/// Read and decode the collection stored at `path`.
pub fn load_from(path: &Path) -> Result<ScheduleCollection> {
    let text = std::fs::read_to_string(path).map_err(|source| ScheduleError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let collection = deserialize_collection(&text)?;
    debug!(
        path = %path.display(),
        schedules = collection.schedules.len(),
        events = collection.event_count(),
        "loaded schedule collection"
    );
    Ok(collection)
}

/// Encode `collection` and write it to `path`, replacing any existing file.
pub fn save_to(path: &Path, collection: &ScheduleCollection) -> Result<()> {
    let text = serialize_collection(collection)?;
    std::fs::write(path, text).map_err(|source| ScheduleError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "saved schedule collection");
    Ok(())
}
