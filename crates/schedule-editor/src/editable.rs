//! The wrapper that pairs a committed event with its pending-edit overlay.
//!
//! UI layers bind to `EditableEvent`: reads go through one "effective" accessor per
//! field (override if set, otherwise derived from the committed event) and writes go
//! to the overlay. The committed event itself is never touched until the owning
//! schedule applies its changes.

use chrono::{NaiveTime, Weekday};
use schedule_model::event::DEFAULT_EVENT_TIME;
use schedule_model::{DaySet, EventKind, ScheduleEvent, TimezoneInfo};

use crate::action;
use crate::display::time_display;
use crate::overlay::{DaySelection, EventOverlay, Field, FieldEdit, OffsetDirection};
use crate::reconcile::{self, reconcile};

#[derive(Debug, Clone)]
pub struct EditableEvent {
    event: ScheduleEvent,
    overlay: EventOverlay,
    display: String,
}

impl EditableEvent {
    pub fn new(event: ScheduleEvent, timezone: &TimezoneInfo) -> Self {
        let display = time_display(&event, timezone);
        Self {
            event,
            overlay: EventOverlay::new(),
            display,
        }
    }

    /// The committed event.
    pub fn event(&self) -> &ScheduleEvent {
        &self.event
    }

    pub fn overlay(&self) -> &EventOverlay {
        &self.overlay
    }

    /// Cached description of the committed event.
    pub fn display(&self) -> &str {
        &self.display
    }

    pub(crate) fn refresh_display(&mut self, timezone: &TimezoneInfo) {
        self.display = time_display(&self.event, timezone);
    }

    pub fn is_dirty(&self) -> bool {
        self.overlay.is_dirty()
    }

    pub fn mark_clean(&mut self) {
        self.overlay.mark_clean();
    }

    pub fn take_changes(&mut self) -> Vec<Field> {
        self.overlay.take_changes()
    }

    // -----------------------------------------------------------------------
    // Writes
    // -----------------------------------------------------------------------

    pub fn set(&mut self, edit: FieldEdit) {
        self.overlay.set(edit);
    }

    pub fn set_kind(&mut self, kind: EventKind) {
        self.set(FieldEdit::Kind(kind));
    }

    pub fn set_payload(&mut self, payload: impl Into<String>) {
        self.set(FieldEdit::Payload(payload.into()));
    }

    /// Set the payload from an action label such as `Turn On`.
    pub fn set_action_text(&mut self, text: &str) {
        let data = action::data_for_action(text);
        if data != self.effective_payload() {
            self.set_payload(data);
        }
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.set(FieldEdit::Disabled(disabled));
    }

    pub fn set_time(&mut self, time: NaiveTime) {
        self.set(FieldEdit::Time(time));
    }

    pub fn set_offset_minutes(&mut self, minutes: u32) {
        self.set(FieldEdit::OffsetMinutes(minutes));
    }

    pub fn set_offset_direction(&mut self, direction: OffsetDirection) {
        self.set(FieldEdit::OffsetDirection(direction));
    }

    /// Select or clear one weekday, keeping the other six as currently shown.
    pub fn toggle_weekday(&mut self, day: Weekday, selected: bool) {
        let current = self.effective_days();
        self.overlay.toggle_weekday(day, selected, || current);
    }

    // -----------------------------------------------------------------------
    // Effective values
    // -----------------------------------------------------------------------

    pub fn effective_kind(&self) -> EventKind {
        reconcile::resolve_kind(&self.event, &self.overlay)
    }

    pub fn effective_payload(&self) -> &str {
        reconcile::resolve_payload(&self.event, &self.overlay)
    }

    pub fn effective_disabled(&self) -> bool {
        reconcile::resolve_disabled(&self.event, &self.overlay)
    }

    /// Time of day; `Some` whenever the effective kind fires at a time.
    pub fn effective_time(&self) -> Option<NaiveTime> {
        reconcile::resolve_time(&self.event, &self.overlay)
            .or_else(|| self.effective_kind().uses_time().then_some(DEFAULT_EVENT_TIME))
    }

    pub fn effective_offset_minutes(&self) -> u32 {
        reconcile::resolve_offset_minutes(&self.event, &self.overlay)
    }

    pub fn effective_offset_direction(&self) -> OffsetDirection {
        reconcile::resolve_offset_direction(&self.event, &self.overlay)
    }

    /// Days as the seven checkboxes currently show them.
    ///
    /// This may be empty, for example after switching a `Daily` event to a day-based
    /// kind or clearing every box. Applying then commits `{DEFAULT_DAY}` instead; see
    /// [`crate::reconcile::DEFAULT_DAY`].
    pub fn effective_days(&self) -> DaySet {
        match self.overlay.days() {
            DaySelection::Touched(days) => days,
            DaySelection::Untouched => self.event.days().unwrap_or_default(),
        }
    }

    pub fn is_day_selected(&self, day: Weekday) -> bool {
        self.effective_days().contains(day)
    }

    pub fn action_text(&self) -> String {
        action::action_text(self.effective_payload())
    }

    pub fn shows_days(&self) -> bool {
        self.effective_kind().uses_days()
    }

    pub fn shows_time_picker(&self) -> bool {
        self.effective_kind().uses_time()
    }

    pub fn shows_offset_editor(&self) -> bool {
        self.effective_kind().uses_offset()
    }

    /// The event that applying this overlay would produce.
    pub fn pending_event(&self) -> ScheduleEvent {
        reconcile(&self.event, &self.overlay)
    }

    /// Description of [`Self::pending_event`].
    pub fn pending_display(&self, timezone: &TimezoneInfo) -> String {
        time_display(&self.pending_event(), timezone)
    }
}
