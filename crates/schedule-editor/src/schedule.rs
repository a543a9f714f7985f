//! Editable schedule aggregate.
//!
//! Owns the ordered list of [`EditableEvent`]s for one schedule and is the only
//! writer of that list. [`EditableSchedule::apply_changes`] takes `&mut self`, so a
//! second apply cannot start while one is running on the same schedule; callers that
//! share a schedule between tasks must serialize access themselves.

use schedule_model::{Schedule, ScheduleEvent, TimezoneInfo};
use tracing::debug;

use crate::editable::EditableEvent;
use crate::overlay::Field;
use crate::reconcile::reconcile;

#[derive(Debug, Clone)]
pub struct EditableSchedule {
    name: String,
    timezone: TimezoneInfo,
    events: Vec<EditableEvent>,
}

impl EditableSchedule {
    pub fn new(schedule: Schedule, timezone: &TimezoneInfo) -> Self {
        let events = schedule
            .events
            .into_iter()
            .map(|event| EditableEvent::new(event, timezone))
            .collect();
        Self {
            name: schedule.name,
            timezone: timezone.clone(),
            events,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn events(&self) -> &[EditableEvent] {
        &self.events
    }

    pub fn event(&self, index: usize) -> Option<&EditableEvent> {
        self.events.get(index)
    }

    pub fn event_mut(&mut self, index: usize) -> Option<&mut EditableEvent> {
        self.events.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Append a committed event and return its index.
    pub fn add_event(&mut self, event: ScheduleEvent) -> usize {
        self.events.push(EditableEvent::new(event, &self.timezone));
        self.events.len() - 1
    }

    /// Remove the event at `index` along with any pending edits.
    pub fn remove_event(&mut self, index: usize) -> Option<ScheduleEvent> {
        (index < self.events.len()).then(|| self.events.remove(index).event().clone())
    }

    pub fn is_dirty(&self) -> bool {
        self.events.iter().any(EditableEvent::is_dirty)
    }

    /// Drain change notifications from every overlay as `(event index, field)`.
    pub fn take_changes(&mut self) -> Vec<(usize, Field)> {
        self.events
            .iter_mut()
            .enumerate()
            .flat_map(|(index, event)| {
                event
                    .take_changes()
                    .into_iter()
                    .map(move |field| (index, field))
            })
            .collect()
    }

    /// Replace every dirty event with its reconciled successor.
    ///
    /// All replacements are computed before the event list is swapped, so callers
    /// observe either the old list or the fully updated one. Each new event keeps
    /// its predecessor's position and every event gets a fresh, clean overlay.
    /// Returns the number of events replaced; a second call with no intervening
    /// edits returns 0.
    pub fn apply_changes(&mut self) -> usize {
        let applied = self.events.iter().filter(|e| e.is_dirty()).count();
        if applied == 0 {
            return 0;
        }

        let committed: Vec<ScheduleEvent> = self
            .events
            .iter()
            .map(|e| {
                if e.is_dirty() {
                    reconcile(e.event(), e.overlay())
                } else {
                    e.event().clone()
                }
            })
            .collect();

        self.events = committed
            .into_iter()
            .map(|event| EditableEvent::new(event, &self.timezone))
            .collect();

        debug!(schedule = %self.name, applied, "applied pending event edits");
        applied
    }

    /// Recompute every cached display string for a new timezone.
    pub fn refresh_displays(&mut self, timezone: &TimezoneInfo) {
        self.timezone = timezone.clone();
        for event in &mut self.events {
            event.refresh_display(timezone);
        }
    }

    /// Snapshot of the committed events. Pending edits are not included.
    pub fn to_schedule(&self) -> Schedule {
        Schedule::with_events(
            self.name.clone(),
            self.events.iter().map(|e| e.event().clone()).collect(),
        )
    }
}
