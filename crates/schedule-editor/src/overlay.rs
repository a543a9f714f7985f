//! Pending-edit overlay for one immutable schedule event.
//!
//! An `EventOverlay` holds an optional override per editable field. Nothing here
//! validates values; defaults are applied only when the overlay is folded into a new
//! event by [`crate::reconcile`]. Every write marks the overlay dirty and records
//! exactly one [`Field`] notification, drained by the owner via
//! [`EventOverlay::take_changes`].

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Weekday};
use schedule_model::{DaySet, EventKind};

use crate::error::EditorError;

/// Which side of sunrise/sunset an offset falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetDirection {
    Before,
    After,
}

impl OffsetDirection {
    /// Direction implied by a signed offset. Zero counts as `After`.
    pub fn of(offset_minutes: i32) -> Self {
        if offset_minutes < 0 {
            OffsetDirection::Before
        } else {
            OffsetDirection::After
        }
    }

    /// Signed minutes for a magnitude in this direction.
    pub fn apply(self, minutes: u32) -> i32 {
        let magnitude = i32::try_from(minutes).unwrap_or(i32::MAX);
        match self {
            OffsetDirection::Before => -magnitude,
            OffsetDirection::After => magnitude,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OffsetDirection::Before => "before",
            OffsetDirection::After => "after",
        }
    }
}

impl fmt::Display for OffsetDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for OffsetDirection {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "before" => Ok(OffsetDirection::Before),
            "after" => Ok(OffsetDirection::After),
            _ => Err(EditorError::InvalidValue(format!(
                "offset direction must be 'before' or 'after', got '{s}'"
            ))),
        }
    }
}

/// A single field write.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldEdit {
    Kind(EventKind),
    Payload(String),
    Disabled(bool),
    Time(NaiveTime),
    OffsetMinutes(u32),
    OffsetDirection(OffsetDirection),
}

impl FieldEdit {
    pub fn field(&self) -> Field {
        match self {
            FieldEdit::Kind(_) => Field::Kind,
            FieldEdit::Payload(_) => Field::Payload,
            FieldEdit::Disabled(_) => Field::Disabled,
            FieldEdit::Time(_) => Field::Time,
            FieldEdit::OffsetMinutes(_) => Field::OffsetMinutes,
            FieldEdit::OffsetDirection(_) => Field::OffsetDirection,
        }
    }
}

/// Names an editable field in change notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Kind,
    Payload,
    Disabled,
    Time,
    OffsetMinutes,
    OffsetDirection,
    Day(Weekday),
}

/// Weekday override state.
///
/// Once touched, the set is the sole source of truth for all seven days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DaySelection {
    #[default]
    Untouched,
    Touched(DaySet),
}

/// Mutable shadow over one immutable event.
#[derive(Debug, Clone, Default)]
pub struct EventOverlay {
    kind: Option<EventKind>,
    payload: Option<String>,
    disabled: Option<bool>,
    time: Option<NaiveTime>,
    offset_minutes: Option<u32>,
    offset_direction: Option<OffsetDirection>,
    days: DaySelection,
    dirty: bool,
    pending: Vec<Field>,
}

impl EventOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an override, mark dirty and record one notification.
    pub fn set(&mut self, edit: FieldEdit) {
        let field = edit.field();
        match edit {
            FieldEdit::Kind(kind) => self.kind = Some(kind),
            FieldEdit::Payload(payload) => self.payload = Some(payload),
            FieldEdit::Disabled(disabled) => self.disabled = Some(disabled),
            FieldEdit::Time(time) => self.time = Some(time),
            FieldEdit::OffsetMinutes(minutes) => self.offset_minutes = Some(minutes),
            FieldEdit::OffsetDirection(direction) => self.offset_direction = Some(direction),
        }
        self.touch(field);
    }

    /// Select or clear one weekday.
    ///
    /// On the first toggle the day set is seeded from `seed` (the current effective
    /// selection) so that editing one day keeps the other six as they were.
    pub fn toggle_weekday(&mut self, day: Weekday, selected: bool, seed: impl FnOnce() -> DaySet) {
        let mut days = match self.days {
            DaySelection::Touched(days) => days,
            DaySelection::Untouched => seed(),
        };
        days.set(day, selected);
        self.days = DaySelection::Touched(days);
        self.touch(Field::Day(day));
    }

    fn touch(&mut self, field: Field) {
        self.dirty = true;
        self.pending.push(field);
    }

    pub fn kind(&self) -> Option<EventKind> {
        self.kind
    }

    pub fn payload(&self) -> Option<&str> {
        self.payload.as_deref()
    }

    pub fn disabled(&self) -> Option<bool> {
        self.disabled
    }

    pub fn time(&self) -> Option<NaiveTime> {
        self.time
    }

    pub fn offset_minutes(&self) -> Option<u32> {
        self.offset_minutes
    }

    pub fn offset_direction(&self) -> Option<OffsetDirection> {
        self.offset_direction
    }

    pub fn days(&self) -> DaySelection {
        self.days
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// True if any override has ever been written.
    pub fn has_overrides(&self) -> bool {
        self.kind.is_some()
            || self.payload.is_some()
            || self.disabled.is_some()
            || self.time.is_some()
            || self.offset_minutes.is_some()
            || self.offset_direction.is_some()
            || self.days != DaySelection::Untouched
    }

    /// Clear the dirty flag. Overrides stay in place.
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Drain notifications recorded since the last call.
    pub fn take_changes(&mut self) -> Vec<Field> {
        std::mem::take(&mut self.pending)
    }
}
