//! Editor session: the document-level state around one editable collection.
//!
//! Tracks where the collection came from, whether it differs from what is on disk,
//! whether overlays hold unapplied edits, and a status line for the last operation.
//! Every save path applies all pending edits in memory before any write, so an I/O
//! failure leaves the in-memory model updated and only the persisted copy stale.

use std::path::{Path, PathBuf};

use chrono::{NaiveTime, Utc};
use schedule_model::event::DEFAULT_EVENT_TIME;
use schedule_model::{load_from, save_to, serialize_collection, ScheduleCollection, ScheduleEvent};
use tracing::{info, warn};

use crate::collection::EditableCollection;
use crate::device::{self, RemoteStore};
use crate::error::{EditorError, Result};

/// Name of the schedule file on a device.
pub const DEFAULT_FILE_NAME: &str = "schedules.json";

/// Where the current collection was loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    Untitled,
    File(PathBuf),
    Device(String),
}

#[derive(Debug)]
pub struct EditorSession {
    collection: EditableCollection,
    origin: Origin,
    remote_file_name: String,
    is_file_modified: bool,
    has_unsaved_changes: bool,
    status: String,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorSession {
    pub fn new() -> Self {
        Self {
            collection: EditableCollection::default(),
            origin: Origin::Untitled,
            remote_file_name: DEFAULT_FILE_NAME.to_string(),
            is_file_modified: false,
            has_unsaved_changes: false,
            status: "Ready".to_string(),
        }
    }

    /// Use `name` instead of [`DEFAULT_FILE_NAME`] on the device.
    pub fn with_remote_file_name(self, name: impl Into<String>) -> Self {
        Self {
            remote_file_name: name.into(),
            ..self
        }
    }

    pub fn collection(&self) -> &EditableCollection {
        &self.collection
    }

    /// Mutable access for field edits. Call [`Self::note_edits`] afterwards so the
    /// session notices them.
    pub fn collection_mut(&mut self) -> &mut EditableCollection {
        &mut self.collection
    }

    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn is_file_modified(&self) -> bool {
        self.is_file_modified
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.has_unsaved_changes
    }

    pub fn window_title(&self) -> String {
        let name = match &self.origin {
            Origin::Untitled => "Untitled".to_string(),
            Origin::File(path) => display_name(path),
            Origin::Device(name) => format!("{name} (from device)"),
        };
        let marker = if self.is_file_modified { "*" } else { "" };
        format!("Schedule Editor - {name}{marker}")
    }

    fn replace(&mut self, collection: ScheduleCollection, origin: Origin) {
        self.collection = EditableCollection::new(collection);
        self.origin = origin;
        self.is_file_modified = false;
        self.has_unsaved_changes = false;
    }

    /// Drain overlay notifications; any edit marks the session as having
    /// unapplied changes. Returns the number of notifications seen.
    pub fn note_edits(&mut self) -> usize {
        let changes = self.collection.take_changes().len();
        if changes > 0 {
            self.has_unsaved_changes = true;
        }
        changes
    }

    fn apply_all_pending_changes(&mut self) -> usize {
        self.note_edits();
        self.collection.apply_all_changes()
    }

    // -----------------------------------------------------------------------
    // Files
    // -----------------------------------------------------------------------

    pub fn new_file(&mut self) {
        self.replace(ScheduleCollection::default(), Origin::Untitled);
        self.status = "New file created".to_string();
    }

    pub fn open(&mut self, path: &Path) -> Result<()> {
        match load_from(path) {
            Ok(collection) => {
                self.replace(collection, Origin::File(path.to_path_buf()));
                self.status = format!("File opened: {}", display_name(path));
                info!(path = %path.display(), "opened schedule file");
                Ok(())
            }
            Err(e) => {
                self.status = format!("Error opening file: {e}");
                warn!(path = %path.display(), error = %e, "failed to open schedule file");
                Err(e.into())
            }
        }
    }

    /// Save to the file the collection was opened from.
    pub fn save(&mut self) -> Result<()> {
        let Origin::File(path) = self.origin.clone() else {
            self.status = "No file name set".to_string();
            return Err(EditorError::NoFileName);
        };
        self.write_file(&path)?;
        self.status = "File saved".to_string();
        Ok(())
    }

    /// Save to `path` and make it the session's file.
    pub fn save_as(&mut self, path: &Path) -> Result<()> {
        self.write_file(path)?;
        self.origin = Origin::File(path.to_path_buf());
        self.status = format!("File saved as: {}", display_name(path));
        Ok(())
    }

    fn write_file(&mut self, path: &Path) -> Result<()> {
        self.apply_all_pending_changes();
        if let Err(e) = save_to(path, &self.collection.to_collection()) {
            self.status = format!("Error saving file: {e}");
            warn!(path = %path.display(), error = %e, "failed to save schedule file");
            return Err(e.into());
        }
        self.is_file_modified = false;
        self.has_unsaved_changes = false;
        info!(path = %path.display(), "saved schedule file");
        Ok(())
    }

    /// Apply every pending edit in memory without writing anything.
    pub fn save_changes(&mut self) -> usize {
        let applied = self.apply_all_pending_changes();
        self.has_unsaved_changes = false;
        self.is_file_modified = true;
        applied
    }

    // -----------------------------------------------------------------------
    // Device
    // -----------------------------------------------------------------------

    pub fn load_from_device(&mut self, store: &mut dyn RemoteStore) -> Result<()> {
        if self.is_file_modified {
            warn!("discarding unsaved changes to load from device");
        }
        match device::pull(store, &self.remote_file_name) {
            Ok(collection) => {
                let origin = Origin::Device(self.remote_file_name.clone());
                self.replace(collection, origin);
                self.status = "Schedule loaded successfully from device".to_string();
                Ok(())
            }
            Err(e) => {
                self.status = format!("Error loading from device: {e}");
                Err(e)
            }
        }
    }

    pub fn save_to_device(&mut self, store: &mut dyn RemoteStore) -> Result<()> {
        self.apply_all_pending_changes();
        let text = match serialize_collection(&self.collection.to_collection()) {
            Ok(text) => text,
            Err(e) => {
                self.status = "Failed to serialize schedule".to_string();
                return Err(e.into());
            }
        };
        match device::push(store, &self.remote_file_name, &text) {
            Ok(()) => {
                self.status = "Schedule saved successfully to device".to_string();
                Ok(())
            }
            Err(e) => {
                self.status = format!("Failed to save schedule to device: {e}");
                Err(e)
            }
        }
    }

    // -----------------------------------------------------------------------
    // Structure edits
    // -----------------------------------------------------------------------

    pub fn set_utc_offset_hours(&mut self, hours: f64) {
        self.collection.set_utc_offset_hours(hours);
        self.is_file_modified = true;
    }

    pub fn set_daylight_saving(&mut self, enabled: bool) {
        self.collection.set_daylight_saving(enabled);
        self.is_file_modified = true;
    }

    pub fn set_timezone_name(&mut self, name: impl Into<String>) {
        self.collection.set_timezone_name(name);
        self.is_file_modified = true;
    }

    /// Add a schedule named `Schedule N` and return its index.
    pub fn add_schedule(&mut self) -> usize {
        let name = format!("Schedule {}", self.collection.len() + 1);
        self.is_file_modified = true;
        self.collection.add_schedule(name)
    }

    pub fn remove_schedule(&mut self, index: usize) -> Result<()> {
        self.collection
            .remove_schedule(index)
            .ok_or_else(|| EditorError::OutOfRange(format!("schedule {index}")))?;
        self.is_file_modified = true;
        Ok(())
    }

    /// Add a daily noon "Turn On" event and return its index.
    pub fn add_event(&mut self, schedule: usize) -> Result<usize> {
        let target = self
            .collection
            .schedule_mut(schedule)
            .ok_or_else(|| EditorError::OutOfRange(format!("schedule {schedule}")))?;
        let noon = Utc::now().date_naive().and_time(DEFAULT_EVENT_TIME).and_utc();
        let index = target.add_event(ScheduleEvent::daily(noon, "true"));
        self.is_file_modified = true;
        Ok(index)
    }

    pub fn remove_event(&mut self, schedule: usize, event: usize) -> Result<()> {
        self.collection
            .schedule_mut(schedule)
            .and_then(|s| s.remove_event(event))
            .ok_or_else(|| {
                EditorError::OutOfRange(format!("event {event} in schedule {schedule}"))
            })?;
        self.is_file_modified = true;
        Ok(())
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Parse `HH:MM` or `HH:MM:SS`.
pub fn parse_time(text: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(text.trim(), "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(text.trim(), "%H:%M:%S"))
        .map_err(|_| EditorError::InvalidValue(format!("expected HH:MM, got '{text}'")))
}
