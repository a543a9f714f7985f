//! Editable collection aggregate: every schedule under one timezone.
//!
//! Changing the timezone never touches an event; it only re-derives the cached
//! display strings of every schedule. Re-deriving is idempotent.

use schedule_model::{DaylightSavingRule, Schedule, ScheduleCollection, TimezoneInfo};
use tracing::{debug, info};

use crate::overlay::Field;
use crate::schedule::EditableSchedule;

#[derive(Debug, Clone, Default)]
pub struct EditableCollection {
    timezone: TimezoneInfo,
    schedules: Vec<EditableSchedule>,
}

impl EditableCollection {
    pub fn new(collection: ScheduleCollection) -> Self {
        let timezone = collection.timezone;
        let schedules = collection
            .schedules
            .into_iter()
            .map(|schedule| EditableSchedule::new(schedule, &timezone))
            .collect();
        Self {
            timezone,
            schedules,
        }
    }

    pub fn timezone(&self) -> &TimezoneInfo {
        &self.timezone
    }

    pub fn set_timezone(&mut self, timezone: TimezoneInfo) {
        self.timezone = timezone;
        self.refresh_all_displays();
    }

    pub fn set_timezone_name(&mut self, name: impl Into<String>) {
        self.timezone.name = name.into();
    }

    pub fn set_utc_offset_hours(&mut self, hours: f64) {
        self.timezone.utc_offset_hours = hours;
        self.refresh_all_displays();
    }

    pub fn has_daylight_saving(&self) -> bool {
        self.timezone.daylight_saving.is_some()
    }

    /// Enable DST with the default rule, or remove the rule.
    ///
    /// Enabling when a rule already exists keeps that rule.
    pub fn set_daylight_saving(&mut self, enabled: bool) {
        match (enabled, self.timezone.daylight_saving.is_some()) {
            (true, false) => self.timezone.daylight_saving = Some(DaylightSavingRule::default()),
            (false, true) => self.timezone.daylight_saving = None,
            _ => {}
        }
        self.refresh_all_displays();
    }

    fn refresh_all_displays(&mut self) {
        for schedule in &mut self.schedules {
            schedule.refresh_displays(&self.timezone);
        }
        debug!(
            offset = self.timezone.utc_offset_hours,
            dst = self.has_daylight_saving(),
            "refreshed event displays"
        );
    }

    pub fn schedules(&self) -> &[EditableSchedule] {
        &self.schedules
    }

    pub fn schedule(&self, index: usize) -> Option<&EditableSchedule> {
        self.schedules.get(index)
    }

    pub fn schedule_mut(&mut self, index: usize) -> Option<&mut EditableSchedule> {
        self.schedules.get_mut(index)
    }

    pub fn schedule_by_name(&mut self, name: &str) -> Option<&mut EditableSchedule> {
        self.schedules.iter_mut().find(|s| s.name() == name)
    }

    pub fn len(&self) -> usize {
        self.schedules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schedules.is_empty()
    }

    /// Append an empty schedule and return its index.
    pub fn add_schedule(&mut self, name: impl Into<String>) -> usize {
        self.schedules
            .push(EditableSchedule::new(Schedule::new(name), &self.timezone));
        self.schedules.len() - 1
    }

    pub fn remove_schedule(&mut self, index: usize) -> Option<Schedule> {
        (index < self.schedules.len()).then(|| self.schedules.remove(index).to_schedule())
    }

    pub fn has_pending_changes(&self) -> bool {
        self.schedules.iter().any(EditableSchedule::is_dirty)
    }

    /// Drain change notifications as `(schedule index, event index, field)`.
    pub fn take_changes(&mut self) -> Vec<(usize, usize, Field)> {
        self.schedules
            .iter_mut()
            .enumerate()
            .flat_map(|(s, schedule)| {
                schedule
                    .take_changes()
                    .into_iter()
                    .map(move |(e, field)| (s, e, field))
            })
            .collect()
    }

    /// Apply pending edits in every schedule. Returns the total events replaced.
    pub fn apply_all_changes(&mut self) -> usize {
        let applied: usize = self
            .schedules
            .iter_mut()
            .map(EditableSchedule::apply_changes)
            .sum();
        if applied > 0 {
            info!(applied, "committed pending schedule edits");
        }
        applied
    }

    /// Snapshot of the committed state, ready to serialize.
    pub fn to_collection(&self) -> ScheduleCollection {
        ScheduleCollection {
            timezone: self.timezone.clone(),
            schedules: self
                .schedules
                .iter()
                .map(EditableSchedule::to_schedule)
                .collect(),
        }
    }
}
