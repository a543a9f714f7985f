//! # schedule-editor
//!
//! Edit overlays and reconciliation for immutable schedule events.
//!
//! UI code binds to per-field candidate values held in an [`EventOverlay`] while the
//! underlying [`schedule_model::ScheduleEvent`] stays untouched. Applying a schedule
//! folds every dirty overlay into a brand-new event of the (possibly changed)
//! variant, filling untouched fields from the original.
//!
//! ## Quick start
//!
//! ```rust
//! use chrono::NaiveTime;
//! use schedule_editor::EditableCollection;
//! use schedule_model::{Schedule, ScheduleCollection, ScheduleEvent, TimezoneInfo};
//!
//! let mut collection = ScheduleCollection::new(TimezoneInfo::fixed("EST", -5.0));
//! collection.schedules.push(Schedule::with_events(
//!     "Porch",
//!     vec![ScheduleEvent::daily_at(NaiveTime::from_hms_opt(12, 0, 0).unwrap(), "true")],
//! ));
//!
//! let mut editor = EditableCollection::new(collection);
//! let porch = editor.schedule_mut(0).unwrap();
//! porch.event_mut(0).unwrap().set_time(NaiveTime::from_hms_opt(9, 30, 0).unwrap());
//! assert_eq!(porch.apply_changes(), 1);
//! assert_eq!(porch.events()[0].display(), "Daily at 09:30 (local 04:30 UTC-5.0)");
//! ```
//!
//! ## Modules
//!
//! - [`overlay`] — per-field overrides, dirty flag, change notifications
//! - [`reconcile`] — pure overlay + original → new event synthesis
//! - [`editable`] — event wrapper with effective-value accessors
//! - [`schedule`] — editable schedule with batch apply
//! - [`collection`] — schedules under one timezone, display refresh
//! - [`display`] — timezone-aware event descriptions
//! - [`action`] — data token ↔ action label mapping
//! - [`device`] — remote store contract and directory-backed store
//! - [`session`] — document state: files, device sync, status line
//! - [`error`] — Error types

pub mod action;
pub mod collection;
pub mod device;
pub mod display;
pub mod editable;
pub mod error;
pub mod overlay;
pub mod reconcile;
pub mod schedule;
pub mod session;

pub use collection::EditableCollection;
pub use device::{DirectoryStore, RemoteStore};
pub use display::time_display;
pub use editable::EditableEvent;
pub use error::EditorError;
pub use overlay::{DaySelection, EventOverlay, Field, FieldEdit, OffsetDirection};
pub use reconcile::reconcile;
pub use schedule::EditableSchedule;
pub use session::{EditorSession, Origin, DEFAULT_FILE_NAME};
