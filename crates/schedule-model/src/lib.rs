//! # schedule-model
//!
//! Immutable value types for time-based automation schedules.
//!
//! A schedule event fires at a fixed UTC time of day, on selected weekdays, or at an
//! offset from sunrise/sunset. Events are plain values: editing one means building a
//! new event, never mutating an existing one.
//!
//! ## Quick start
//!
//! ```rust
//! use chrono::{NaiveTime, Weekday};
//! use schedule_model::{DaySet, ScheduleEvent, EventKind};
//!
//! let lights = ScheduleEvent::sunset_offset(-15, "true", DaySet::from_days([Weekday::Fri]));
//! assert_eq!(lights.kind(), EventKind::SunsetOffset);
//! assert_eq!(lights.offset_minutes(), Some(-15));
//!
//! let noon = ScheduleEvent::daily_at(NaiveTime::from_hms_opt(12, 0, 0).unwrap(), "false");
//! assert!(noon.days().is_none());
//! ```
//!
//! ## Modules
//!
//! - [`days`] — `DaySet`, a compact set of weekdays
//! - [`event`] — `ScheduleEvent`, `Trigger` and `EventKind`
//! - [`timezone`] — UTC offset plus optional DST rule
//! - [`collection`] — named schedules grouped under one timezone
//! - [`serializer`] — JSON encode/decode and file load/save
//! - [`error`] — Error types

pub mod collection;
pub mod days;
pub mod error;
pub mod event;
pub mod serializer;
pub mod timezone;

pub use collection::{Schedule, ScheduleCollection};
pub use days::DaySet;
pub use error::ScheduleError;
pub use event::{
    time_of_day_instant, EventKind, ScheduleEvent, Trigger, TIME_OF_DAY_REFERENCE_DATE,
};
pub use serializer::{deserialize_collection, load_from, save_to, serialize_collection};
pub use timezone::{DaylightSavingRule, TimezoneInfo, TransitionRule};
