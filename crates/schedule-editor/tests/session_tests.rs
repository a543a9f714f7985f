//! Tests for the editor session: files, device sync and status reporting.

use std::path::PathBuf;

use chrono::{NaiveTime, Weekday};
use schedule_editor::device::{self, RUNTIME_DISABLED_MARKER};
use schedule_editor::{DirectoryStore, EditorError, EditorSession, Origin, RemoteStore};
use schedule_model::{
    load_from, save_to, DaySet, Schedule, ScheduleCollection, ScheduleEvent, TimezoneInfo,
};

/// Helper: a fresh, empty scratch directory unique to one test.
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("schedule-editor-{name}"));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).expect("scratch dir must be creatable");
    dir
}

fn hm(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn sample() -> ScheduleCollection {
    let mut collection = ScheduleCollection::new(TimezoneInfo::fixed("EST", -5.0));
    collection.schedules.push(Schedule::with_events(
        "Porch",
        vec![
            ScheduleEvent::daily_at(hm(12, 0), "true"),
            ScheduleEvent::sunset_offset(-15, "true", DaySet::from_days([Weekday::Fri])),
        ],
    ));
    collection
}

/// A store whose writes always fail, recording runtime toggles.
#[derive(Default)]
struct BrokenStore {
    runtime_calls: Vec<bool>,
}

impl RemoteStore for BrokenStore {
    fn read_file(&mut self, _name: &str) -> schedule_editor::error::Result<Option<String>> {
        Ok(None)
    }

    fn write_file(&mut self, _name: &str, _contents: &str) -> schedule_editor::error::Result<()> {
        Err(EditorError::Device("connection reset".to_string()))
    }

    fn is_runtime_enabled(&mut self) -> schedule_editor::error::Result<bool> {
        Ok(true)
    }

    fn set_runtime_enabled(&mut self, enabled: bool) -> schedule_editor::error::Result<()> {
        self.runtime_calls.push(enabled);
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Document state
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn new_session_is_untitled_and_clean() {
    let session = EditorSession::new();
    assert_eq!(session.window_title(), "Schedule Editor - Untitled");
    assert_eq!(session.status(), "Ready");
    assert_eq!(session.origin(), &Origin::Untitled);
    assert!(!session.is_file_modified());
}

#[test]
fn structure_edits_mark_file_modified() {
    let mut session = EditorSession::new();
    let index = session.add_schedule();
    assert_eq!(session.collection().schedule(index).unwrap().name(), "Schedule 1");
    assert_eq!(session.window_title(), "Schedule Editor - Untitled*");

    let event = session.add_event(index).unwrap();
    let added = session.collection().schedule(index).unwrap().event(event).unwrap();
    assert_eq!(added.event().data, "true");
    assert_eq!(added.event().time().map(|t| t.time()), Some(hm(12, 0)));

    assert!(matches!(session.add_event(7), Err(EditorError::OutOfRange(_))));
    session.remove_event(index, event).unwrap();
    session.remove_schedule(index).unwrap();
    assert!(session.collection().is_empty());
}

#[test]
fn field_edits_raise_unsaved_changes() {
    let dir = scratch_dir("unsaved");
    let path = dir.join("porch.json");
    save_to(&path, &sample()).unwrap();

    let mut session = EditorSession::new();
    session.open(&path).unwrap();
    assert!(!session.has_unsaved_changes());

    session
        .collection_mut()
        .schedule_mut(0)
        .unwrap()
        .event_mut(0)
        .unwrap()
        .set_payload("false");
    assert_eq!(session.note_edits(), 1);
    assert!(session.has_unsaved_changes());

    assert_eq!(session.save_changes(), 1);
    assert!(!session.has_unsaved_changes());
    assert!(session.is_file_modified());
}

// ─────────────────────────────────────────────────────────────────────────────
// Files
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn save_without_file_name_is_refused() {
    let mut session = EditorSession::new();
    assert!(matches!(session.save(), Err(EditorError::NoFileName)));
}

#[test]
fn save_as_applies_pending_edits_first() {
    let dir = scratch_dir("save-as");
    let source = dir.join("in.json");
    let target = dir.join("out.json");
    save_to(&source, &sample()).unwrap();

    let mut session = EditorSession::new();
    session.open(&source).unwrap();
    assert_eq!(session.status(), "File opened: in.json");

    session
        .collection_mut()
        .schedule_mut(0)
        .unwrap()
        .event_mut(1)
        .unwrap()
        .set_offset_minutes(45);
    session.save_as(&target).unwrap();

    assert_eq!(session.status(), "File saved as: out.json");
    assert_eq!(session.window_title(), "Schedule Editor - out.json");
    assert!(!session.collection().has_pending_changes());

    let written = load_from(&target).unwrap();
    assert_eq!(written.schedules[0].events[1].offset_minutes(), Some(-45));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn failed_write_keeps_applied_model() {
    let dir = scratch_dir("failed-write");
    let mut session = EditorSession::new();
    session.add_schedule();
    session.add_event(0).unwrap();
    session
        .collection_mut()
        .schedule_mut(0)
        .unwrap()
        .event_mut(0)
        .unwrap()
        .set_time(hm(6, 0));

    let missing = dir.join("no-such-dir").join("out.json");
    let err = session.save_as(&missing).unwrap_err();
    assert!(matches!(err, EditorError::Model(_)));
    assert!(session.status().starts_with("Error saving file:"));

    assert!(!session.collection().has_pending_changes());
    let committed = session.collection().to_collection();
    assert_eq!(committed.schedules[0].events[0].time().map(|t| t.time()), Some(hm(6, 0)));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn open_missing_file_reports_status() {
    let dir = scratch_dir("open-missing");
    let mut session = EditorSession::new();
    assert!(session.open(&dir.join("nope.json")).is_err());
    assert!(session.status().starts_with("Error opening file:"));
    assert_eq!(session.origin(), &Origin::Untitled);
}

// ─────────────────────────────────────────────────────────────────────────────
// Device
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn device_round_trip_through_directory_store() {
    let dir = scratch_dir("device-roundtrip");
    let mut store = DirectoryStore::new(&dir);

    let mut session = EditorSession::new();
    session.collection_mut().set_timezone(TimezoneInfo::fixed("EST", -5.0));
    session.add_schedule();
    session.add_event(0).unwrap();
    session.save_to_device(&mut store).unwrap();

    assert_eq!(session.status(), "Schedule saved successfully to device");
    assert!(dir.join("schedules.json").exists());
    assert!(!dir.join(RUNTIME_DISABLED_MARKER).exists());

    let mut reloaded = EditorSession::new();
    reloaded.load_from_device(&mut store).unwrap();
    assert_eq!(
        reloaded.origin(),
        &Origin::Device("schedules.json".to_string())
    );
    assert_eq!(
        reloaded.window_title(),
        "Schedule Editor - schedules.json (from device)"
    );
    assert_eq!(
        reloaded.collection().to_collection(),
        session.collection().to_collection()
    );

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn custom_remote_file_name() {
    let dir = scratch_dir("device-custom-name");
    let mut store = DirectoryStore::new(&dir);
    let mut session = EditorSession::new().with_remote_file_name("lights.json");
    session.save_to_device(&mut store).unwrap();
    assert!(dir.join("lights.json").exists());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn missing_device_file_is_an_error() {
    let dir = scratch_dir("device-missing");
    let mut store = DirectoryStore::new(&dir);
    let mut session = EditorSession::new();

    let err = session.load_from_device(&mut store).unwrap_err();
    assert!(matches!(err, EditorError::MissingRemoteFile(_)));
    assert!(session
        .status()
        .contains("No schedules.json file found on device"));

    std::fs::write(dir.join("schedules.json"), "  \n").unwrap();
    assert!(matches!(
        device::pull(&mut store, "schedules.json"),
        Err(EditorError::MissingRemoteFile(_))
    ));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn failed_device_write_still_restores_runtime() {
    let mut store = BrokenStore::default();
    let mut session = EditorSession::new();
    session.add_schedule();

    let err = session.save_to_device(&mut store).unwrap_err();
    assert!(matches!(err, EditorError::Device(_)));
    assert_eq!(store.runtime_calls, vec![false, true]);
    assert!(session
        .status()
        .starts_with("Failed to save schedule to device:"));
}

#[test]
fn directory_store_requires_existing_root() {
    let dir = scratch_dir("device-root").join("unplugged");
    let mut store = DirectoryStore::new(&dir);
    assert!(matches!(
        store.is_runtime_enabled(),
        Err(EditorError::Device(_))
    ));
}
